//! MCP server package generation
//!
//! This crate renders a [`NormalizedSpec`] into a runnable Python MCP server
//! package: one tool per operation, plus an immutable handler mapping that
//! forwards each tool call to the target API.

mod context;
mod templates;

pub use context::{build_function_contexts, FunctionContext};

use openapi_mcp_generator_common::{GeneratorConfig, GeneratorError, NormalizedSpec, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// MCP server generator
///
/// Transforms a NormalizedSpec into a complete server package:
/// - main.py (tool listing and dispatch)
/// - handlers.py (HTTP forwarding)
/// - config.py (target URL and auth)
/// - requirements.txt, README.md, Dockerfile
pub struct ServerGenerator {
    spec: NormalizedSpec,
    config: GeneratorConfig,
    tera: Tera,
}

impl ServerGenerator {
    /// Create a new server generator
    pub fn new(spec: NormalizedSpec, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let tera = templates::load_templates()?;
        Ok(Self { spec, config, tera })
    }

    /// Generate into the configured `output_dir/server_name`
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        self.generate_to_directory(&self.config.package_dir())
    }

    /// Generate all server files to a directory, returning the written paths
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        // Nothing is written until every template has rendered.
        // Each template renders to the file of the same name.
        let rendered = templates::template_names()
            .map(|file| self.render(file).map(|content| (file, content)))
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to create output directory {:?}: {}",
                output_dir, e
            ))
        })?;

        let mut written = Vec::with_capacity(rendered.len());
        for (file, content) in rendered {
            let output_path = output_dir.join(file);
            fs::write(&output_path, content).map_err(|e| {
                GeneratorError::Generation(format!("Failed to write {}: {}", file, e))
            })?;
            written.push(output_path);
        }

        Ok(written)
    }

    /// Render a single template to a string
    pub fn render(&self, template: &str) -> Result<String> {
        let context = self.create_context()?;
        self.tera
            .render(template, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))
    }

    /// Default target URL baked into the generated config
    ///
    /// The configured override wins over the document's base URL.
    pub fn base_url(&self) -> &str {
        self.config
            .target_url
            .as_deref()
            .unwrap_or(&self.spec.base_url)
    }

    /// Create template context from the NormalizedSpec
    fn create_context(&self) -> Result<tera::Context> {
        let functions = build_function_contexts(&self.spec.operations)?;

        let mut context = tera::Context::new();
        context.insert("server_name", &self.config.server_name);
        context.insert("default_target_url", self.base_url());
        context.insert("spec_version", &self.spec.version);
        context.insert("functions", &functions);
        context.insert(
            "has_security",
            &self.spec.operations.iter().any(|op| !op.security.is_empty()),
        );
        Ok(context)
    }
}

/// Generate a server package (convenience function)
pub fn generate_server(spec: NormalizedSpec, config: GeneratorConfig) -> Result<Vec<PathBuf>> {
    ServerGenerator::new(spec, config)?.generate()
}
