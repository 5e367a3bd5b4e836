//! CLI for objmd - renders JSON documents as Markdown

use clap::Parser;
use objmd::{Error, ListStyle, Mapping, MarkdownConfig, MarkdownEngine, Result, TableFormat, Value};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file path (reads stdin if not specified or "-")
    input: Option<PathBuf>,

    /// Output Markdown file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render mappings as definition lists instead of tables
    #[arg(long)]
    no_tables: bool,

    /// Sort mapping keys before rendering
    #[arg(long)]
    sort_keys: bool,

    /// List marker: dash, asterisk or plus
    #[arg(long)]
    list_style: Option<String>,

    /// Table separator style: github, markdown or pipe
    #[arg(long)]
    table_format: Option<String>,

    /// Metadata entry as key=value; enables the document information section
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    meta: Vec<String>,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    let metadata = parse_metadata(&args.meta)?;

    let source = read_input(args.input.as_deref())?;
    let json: serde_json::Value =
        serde_json::from_str(&source).map_err(|e| Error::Json(e.to_string()))?;
    let value = Value::from(json);

    let engine = MarkdownEngine::with_config(config);
    let markdown = engine.convert_with_metadata(&value, &metadata, engine.config());
    tracing::info!(bytes = markdown.len(), "Rendered document");

    match args.output {
        Some(output) => {
            std::fs::write(&output, &markdown)?;
            tracing::info!(path = %output.display(), "Wrote output");
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<MarkdownConfig> {
    let base = match &args.config {
        Some(path) => MarkdownConfig::load(path)?,
        None => MarkdownConfig::default(),
    };

    let mut builder = base.to_builder();
    if args.no_tables {
        builder = builder.include_tables(false);
    }
    if args.sort_keys {
        builder = builder.sort_map_keys(true);
    }
    if let Some(style) = &args.list_style {
        builder = builder.list_style(ListStyle::parse_lenient(style));
    }
    if let Some(format) = &args.table_format {
        builder = builder.table_format(TableFormat::parse_lenient(format));
    }
    if !args.meta.is_empty() {
        builder = builder.include_metadata(true);
    }
    Ok(builder.build())
}

fn parse_metadata(entries: &[String]) -> Result<Mapping> {
    let mut metadata = Mapping::new();
    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("metadata entry '{}' is not key=value", entry)))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Config(format!("metadata entry '{}' has an empty key", entry)));
        }
        metadata.insert(key, value.trim());
    }
    Ok(metadata)
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
