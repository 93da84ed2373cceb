#![deny(missing_docs)]

//! # Export Command
//!
//! Loads an OpenAPI document, normalizes it and writes the endpoint model.
//!
//! 1. **Config**: optional YAML file, then `--max-depth` / `APISHEET_MAX_DEPTH`.
//! 2. **Load**: parse, version check, dereference.
//! 3. **Normalize**: one record per path/method.
//! 4. **Write**: JSON or YAML to stdout or a file (existing files need `--force`).
//!    An output directory receives `<input stem>.json` or `<input stem>.yaml`.

use crate::error::{CliError, CliResult};
use apisheet_core::{load_document, EndpointNormalizer, NormalizedDocument, NormalizerConfig};
use clap::ValueEnum;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serialization format of the output.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the export command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the OpenAPI 3.x document (YAML or JSON).
    pub input: PathBuf,

    /// Output file or directory. Writes to stdout when omitted.
    ///
    /// An existing directory, or a path ending in a separator, gets a file named
    /// after the input.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Normalizer configuration file (YAML).
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Maximum nesting depth of flattened properties.
    #[clap(long, env = "APISHEET_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Overwrite the output file if it exists.
    #[clap(long)]
    pub force: bool,
}

/// Executes the export pipeline.
pub fn execute(args: &ExportArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let output = args
        .output
        .as_deref()
        .map(|path| resolve_output_path(path, &args.input, args.format));

    if let Some(output) = &output {
        if output.exists() && !args.force {
            return Err(CliError::General(format!(
                "Output file '{}' already exists (use --force to overwrite)",
                output.display()
            )));
        }
    }

    let openapi = load_document(&args.input, &config)?;
    let document = EndpointNormalizer::new(config).normalize(&openapi);
    info!(endpoints = document.endpoints.len(), "Normalized document");

    let rendered = render(&document, args.format)?;
    match &output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
        }
    }
    Ok(())
}

/// The file to write for `--output`.
///
/// Directories (existing, or spelled with a trailing separator) get
/// `<input stem>.<format extension>` inside them.
fn resolve_output_path(output: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let names_directory = output
        .to_str()
        .and_then(|s| s.chars().last())
        .is_some_and(std::path::is_separator);
    if !names_directory && !output.is_dir() {
        return output.to_path_buf();
    }

    let stem = input
        .file_stem()
        .map_or_else(|| "openapi".into(), |s| s.to_string_lossy().into_owned());
    output.join(format!("{}.{}", stem, format.extension()))
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Reads the optional config file and applies the depth override.
fn resolve_config(args: &ExportArgs) -> CliResult<NormalizerConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => NormalizerConfig::default(),
    };
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> CliResult<NormalizerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(NormalizerConfig::from_yaml_str(&content)?)
}

/// Serializes the document in the requested format.
fn render(document: &NormalizedDocument, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::General(format!("Failed to serialize JSON: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(document)
            .map_err(|e| CliError::General(format!("Failed to serialize YAML: {}", e))),
    }
}
