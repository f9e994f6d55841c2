//! Keyboard text reconstruction command.

use crate::commands::{KeyboardArgs, SourceSettings, open_input};
use crate::config::ReplayConfig;
use crate::output;
use anyhow::{Context, Result};
use hidreplay_keyboard::KeyboardDecoder;
use tracing::info;

/// Execute the keyboard command.
pub fn execute(args: &KeyboardArgs, config: &ReplayConfig, json: bool) -> Result<()> {
    let settings = SourceSettings::resolve(&args.source, config)?;
    let source = open_input(&args.source.input, &settings)?;

    let session = KeyboardDecoder::with_sentinel(settings.sentinel)
        .decode_source(source)
        .with_context(|| {
            format!(
                "Failed to read keyboard reports from '{}'",
                args.source.input.display()
            )
        })?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.keyboard.output.clone());
    std::fs::write(&output_path, &session.text)
        .with_context(|| format!("Failed to write output file '{}'", output_path.display()))?;
    info!(path = %output_path.display(), "wrote reconstructed text");

    output::print_keyboard_summary(&session, &output_path, args.print, json);
    Ok(())
}
