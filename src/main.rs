//! JSON:API key transform CLI entry point.
//!
//! Reads a JSON document, rewrites its keys and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use jsonapi_key_transform::{
    AdapterKind, DocumentRenderer, KeyTransformConfig, SerializationContext,
};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "jsonapi-key-transform")]
#[command(author, version, about = "Rewrite the keys of JSON:API documents")]
struct Args {
    /// Document to transform; reads stdin when absent or "-"
    input: Option<PathBuf>,

    /// Configuration file path (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-call key transform (unaltered, dashed, camel, camel_lower)
    #[arg(short, long, env = "KEY_TRANSFORM")]
    key_transform: Option<String>,

    /// Adapter, overrides the configured one
    #[arg(long, value_enum)]
    adapter: Option<AdapterKind>,

    /// Pretty print the output
    #[arg(long)]
    pretty: bool,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print example configuration and exit.
    #[arg(long)]
    example_config: bool,

    /// Validate configuration and exit.
    #[arg(long)]
    validate: bool,
}

fn print_example_config() {
    let example = r#"# Key Transform Configuration Example
version: "1"

settings:
  # Adapter the documents are rendered for: attributes, json, json_api.
  # Selects the fallback key transform (json_api: dashed, others: unaltered).
  adapter: json_api
  # Global default key transform: unaltered, dashed, camel, camel_lower.
  # A per-call --key-transform takes precedence.
  key_transform: camel_lower
  # Pretty print rendered output
  pretty: false
"#;
    println!("{}", example);
}

fn load_config(path: &Path) -> Result<KeyTransformConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = if path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
    {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(config)
}

fn read_document(input: Option<&Path>) -> Result<JsonValue> {
    let content = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read document from stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("Document is not valid JSON")
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if args.example_config {
        print_example_config();
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => KeyTransformConfig::default(),
    };

    if let Some(adapter) = args.adapter {
        config.settings.adapter = adapter;
    }
    if args.pretty {
        config.settings.pretty = true;
    }

    let renderer = DocumentRenderer::new(config);

    if args.validate {
        renderer.validate()?;
        info!("Configuration is valid");
        return Ok(());
    }

    let document = read_document(args.input.as_deref())?;

    let mut ctx = SerializationContext::new("cli");
    if let Some(token) = args.key_transform {
        ctx = ctx.with_key_transform(token);
    }

    let output = renderer
        .render_to_string(&document, &ctx)
        .context("Failed to transform document")?;
    println!("{}", output);

    debug!(stats = ?renderer.stats(), "Done");

    Ok(())
}
