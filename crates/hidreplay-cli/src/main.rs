//! hidreplay - HID capture replay CLI
//!
//! Reconstructs typed text and drawn pointer strokes from USB HID report
//! streams extracted out of a packet capture.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{KeyboardArgs, PointerArgs};
use crate::config::ReplayConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "hidreplay")]
#[command(about = "Reconstruct keyboard text and pointer strokes from captured HID reports")]
#[command(version)]
#[command(long_about = "
hidreplay decodes USB HID report streams that were extracted from a packet
capture (one hex record per line, or JSON Lines capture entries) and
reconstructs what was typed on a keyboard or drawn with a mouse.

Malformed records are counted and skipped; decoding always runs to the end
of the input.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true, env = "HIDREPLAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct typed text from keyboard reports
    Keyboard(KeyboardArgs),

    /// Reconstruct drawn strokes from mouse reports
    Pointer(PointerArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ReplayConfig, CliError> {
    match &cli.config {
        Some(path) => ReplayConfig::load(path),
        None => Ok(ReplayConfig::default()),
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    match &cli.command {
        Commands::Keyboard(args) => commands::keyboard::execute(args, &config, cli.json),
        Commands::Pointer(args) => commands::pointer::execute(args, &config, cli.json),
    }
}
