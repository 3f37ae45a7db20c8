//! OpenAPI MCP Generator CLI
//!
//! Command-line interface for turning OpenAPI v2/v3 documents into MCP servers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openapi_mcp_generator_common::{GeneratorConfig, NormalizedSpec};
use openapi_mcp_generator_generator::ServerGenerator;
use openapi_mcp_generator_parser::OpenApiParser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-mcp-generator")]
#[command(version, about = "Generate MCP servers from OpenAPI specifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a spec file and display the normalized operations
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a Swagger 2.0 document\n  \
        openapi-mcp-generator parse --spec petstore.json\n\n  \
        # Dump the normalized operations as JSON\n  \
        openapi-mcp-generator parse --spec petstore.yaml --json")]
    Parse {
        /// Path to the OpenAPI spec file (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Print the normalized spec as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an MCP server package from a spec file
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into ./output/petstore_mcp\n  \
        openapi-mcp-generator generate \\\n    \
        --spec petstore.yaml \\\n    \
        --server-name petstore_mcp\n\n  \
        # Point the server at a local API instead of the documented one\n  \
        openapi-mcp-generator generate \\\n    \
        --spec petstore.yaml \\\n    \
        --target-url http://localhost:8080 \\\n    \
        --output ./servers\n\n  \
        # Read defaults from a config file\n  \
        openapi-mcp-generator generate --spec petstore.yaml --config generator.yaml")]
    Generate {
        /// Path to the OpenAPI spec file (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Name of the generated server package
        #[arg(short = 'n', long)]
        server_name: Option<String>,

        /// Base URL of the target API (overrides the spec's servers/host)
        #[arg(short, long)]
        target_url: Option<String>,

        /// Directory the server package is created in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file with generator settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { spec, json } => {
            parse_command(spec.as_path(), json, cli.verbose)?;
        }
        Commands::Generate {
            spec,
            server_name,
            target_url,
            output,
            config,
        } => {
            let config = load_config(config.as_deref(), server_name, target_url, output)?;
            generate_command(spec.as_path(), config, cli.verbose)?;
        }
    }

    Ok(())
}

/// `--verbose` forces debug output, otherwise `RUST_LOG` applies (default `warn`)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(
    config_path: Option<&Path>,
    server_name: Option<String>,
    target_url: Option<String>,
    output: Option<PathBuf>,
) -> Result<GeneratorConfig> {
    let base = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading generator config");
            GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    base.with_overrides(server_name, target_url, output)
        .context("Invalid generator settings")
}

fn load_spec(spec_path: &Path) -> Result<NormalizedSpec> {
    let parser = OpenApiParser::from_file(spec_path)
        .with_context(|| format!("Failed to load OpenAPI spec {}", spec_path.display()))?;
    tracing::debug!(version = ?parser.version(), "detected spec version");

    let spec = parser.parse().context("Failed to parse OpenAPI spec")?;
    tracing::debug!(
        operations = spec.operations.len(),
        diagnostics = spec.diagnostics.len(),
        base_url = %spec.base_url,
        "normalized spec"
    );

    report_diagnostics(&spec);
    Ok(spec)
}

fn report_diagnostics(spec: &NormalizedSpec) {
    for diagnostic in &spec.diagnostics {
        tracing::debug!(kind = ?diagnostic.kind, operation = ?diagnostic.operation_id, "diagnostic");
        eprintln!("{} {}", "⚠".yellow(), diagnostic);
    }
}

fn parse_command(spec_path: &Path, json: bool, verbose: bool) -> Result<()> {
    if json {
        let spec = load_spec(spec_path)?;
        let rendered =
            serde_json::to_string_pretty(&spec).context("Failed to serialize normalized spec")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("{} Parsing spec file: {}", "→".cyan(), spec_path.display());
    let spec = load_spec(spec_path)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Normalized Spec:".bold());
    println!("  Version: {}", format!("{:?}", spec.version).yellow());
    println!("  Base URL: {}", spec.base_url.yellow());
    println!("  Operations: {}", spec.operations.len());
    if !spec.diagnostics.is_empty() {
        println!("  Diagnostics: {}", spec.diagnostics.len().to_string().yellow());
    }

    if !spec.operations.is_empty() {
        println!("\n{}", "Operations:".bold());
    }
    for op in &spec.operations {
        println!("  • {} ({})", op.id.cyan(), op.locator());
        if verbose {
            if !op.description.is_empty() {
                println!("    {}", op.description.lines().next().unwrap_or_default());
            }
            println!(
                "    Parameters: {} path, {} query, {} header",
                op.path_params.len(),
                op.query_params.len(),
                op.header_params.len()
            );
            if op.request_body_schema.is_some() {
                println!("    Request body: yes");
            }
            if !op.security.is_empty() {
                println!("    Security requirements: {}", op.security.len());
            }
        }
    }

    Ok(())
}

fn generate_command(spec_path: &Path, config: GeneratorConfig, verbose: bool) -> Result<()> {
    println!(
        "{} Generating MCP server from: {}",
        "→".cyan(),
        spec_path.display()
    );

    if verbose {
        println!("  Server name: {}", config.server_name);
        println!("  Output: {}", config.package_dir().display());
        if let Some(url) = &config.target_url {
            println!("  Target URL override: {}", url);
        }
    }

    println!("{} Parsing spec...", "→".cyan());
    let spec = load_spec(spec_path)?;
    println!("{} Parsed {} operations", "✓".green(), spec.operations.len());

    println!("{} Generating server files...", "→".cyan());
    let package_dir = config.package_dir();
    let generator = ServerGenerator::new(spec, config).context("Failed to create generator")?;
    let target_url = generator.base_url().to_string();
    let written = generator
        .generate_to_directory(&package_dir)
        .context("Failed to generate MCP server")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }
    println!("\n{}", "Next steps:".bold());
    println!("  1. Review generated files in {}", package_dir.display());
    println!(
        "  2. Install dependencies: cd {} && pip install -r requirements.txt",
        package_dir.display()
    );
    println!(
        "  3. Run the server: TARGET_API_BASE_URL={} python main.py",
        target_url
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "openapi-mcp-generator",
            "generate",
            "--spec",
            "petstore.yaml",
            "--server-name",
            "pets",
            "--target-url",
            "http://localhost:8080",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Generate {
                spec,
                server_name,
                target_url,
                output,
                config,
            } => {
                assert_eq!(spec, PathBuf::from("petstore.yaml"));
                assert_eq!(server_name.as_deref(), Some("pets"));
                assert_eq!(target_url.as_deref(), Some("http://localhost:8080"));
                assert!(output.is_none());
                assert!(config.is_none());
            }
            Commands::Parse { .. } => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_load_config_defaults_and_overrides() {
        let config = load_config(None, None, None, None).unwrap();
        assert_eq!(config, GeneratorConfig::default());

        let config = load_config(
            None,
            Some("pets".to_string()),
            None,
            Some(PathBuf::from("/tmp/servers")),
        )
        .unwrap();
        assert_eq!(config.package_dir(), PathBuf::from("/tmp/servers/pets"));

        assert!(load_config(None, Some("1pets".to_string()), None, None).is_err());
    }
}
