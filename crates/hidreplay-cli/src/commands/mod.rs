//! Command implementations for the hidreplay CLI

pub mod keyboard;
pub mod pointer;

use crate::config::ReplayConfig;
use crate::error::CliError;
use clap::{Args, ValueEnum};
use hidreplay_report::{ReportSource, SourceFormat, open_source};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One hex record per line
    Lines,
    /// JSON Lines capture entries
    JsonLines,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Lines => SourceFormat::Lines,
            FormatArg::JsonLines => SourceFormat::JsonLines,
        }
    }
}

/// Where to read reports from and how to split them into records.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Report file extracted from the capture
    pub input: PathBuf,

    /// Input layout (default from config: lines)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Keep every Nth line (2 for exports that interleave a second field)
    #[arg(long)]
    pub stride: Option<usize>,

    /// Record text meaning "no capture data"
    #[arg(long)]
    pub sentinel: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct KeyboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Where to write the reconstructed text
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print the reconstructed text
    #[arg(long)]
    pub print: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PointerArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Where to write the stroke JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum points for a stroke to count as drawable
    #[arg(long)]
    pub min_points: Option<usize>,
}

/// Source settings after applying flag overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub format: SourceFormat,
    pub stride: usize,
    pub sentinel: String,
}

impl SourceSettings {
    pub fn resolve(args: &SourceArgs, config: &ReplayConfig) -> Result<Self, CliError> {
        let merged = ReplayConfig {
            format: args.format.map_or(config.format, SourceFormat::from),
            stride: args.stride.unwrap_or(config.stride),
            sentinel: args
                .sentinel
                .clone()
                .unwrap_or_else(|| config.sentinel.clone()),
            ..config.clone()
        };
        merged.validate()?;
        Ok(Self {
            format: merged.format,
            stride: merged.stride,
            sentinel: merged.sentinel,
        })
    }
}

/// Open the report file named on the command line.
pub fn open_input(path: &Path, settings: &SourceSettings) -> Result<Box<dyn ReportSource>, CliError> {
    if !path.exists() {
        return Err(CliError::InputNotFound(path.display().to_string()));
    }
    debug!(path = %path.display(), ?settings, "opening report file");
    Ok(open_source(path, settings.format, settings.stride)?)
}
