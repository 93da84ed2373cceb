#![deny(missing_docs)]

//! # Apisheet CLI
//!
//! Command Line Interface that flattens an OpenAPI 3.x document into per-endpoint
//! records and writes them as JSON or YAML.
//!
//! ```text
//! apisheet openapi.yaml --output endpoints.json
//! apisheet openapi.yaml --format yaml --max-depth 3
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod export;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI endpoint sheet exporter")]
struct Cli {
    #[clap(flatten)]
    export: export::ExportArgs,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    export::execute(&cli.export)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
