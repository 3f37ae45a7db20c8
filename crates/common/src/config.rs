//! Generator configuration loading from YAML files
//!
//! Settings may come from a YAML file, from CLI flags, or both; flags win.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name for the generated server package
pub const DEFAULT_SERVER_NAME: &str = "generated_mcp_server";

/// Default directory generated packages are written under
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Settings for generating an MCP server package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name of the generated server directory/package
    pub server_name: String,

    /// Replaces the base URL resolved from the document
    pub target_url: Option<String>,

    /// Directory the package directory is created in
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            target_url: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| GeneratorError::Config(format!("Invalid config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides on top of file or default values
    pub fn with_overrides(
        mut self,
        server_name: Option<String>,
        target_url: Option<String>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(name) = server_name {
            self.server_name = name;
        }
        if let Some(url) = target_url {
            self.target_url = Some(url);
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the server name is usable as a directory and package name
    pub fn validate(&self) -> Result<()> {
        if !is_valid_server_name(&self.server_name) {
            return Err(GeneratorError::Config(format!(
                "Invalid server name '{}': expected letters, digits, '_' or '-', not starting with a digit or '-'",
                self.server_name
            )));
        }

        if let Some(url) = &self.target_url {
            if url.trim().is_empty() {
                return Err(GeneratorError::Config(
                    "Target URL override must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Directory the package for this server is written to
    pub fn package_dir(&self) -> PathBuf {
        self.output_dir.join(&self.server_name)
    }
}

fn is_valid_server_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
