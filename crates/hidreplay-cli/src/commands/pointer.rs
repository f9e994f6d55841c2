//! Pointer stroke reconstruction command.
//!
//! Writes stroke data for an external renderer; nothing is plotted here.

use crate::commands::{PointerArgs, SourceSettings, open_input};
use crate::config::ReplayConfig;
use crate::output;
use anyhow::{Context, Result};
use hidreplay_pointer::{
    Bounds, PointerDecoder, PointerStats, Stroke, drawing_bounds, render_filter,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Stroke file consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeDocument {
    pub strokes: Vec<Stroke>,
    pub drawable: usize,
    pub bounds: Option<Bounds>,
    pub stats: PointerStats,
}

/// Execute the pointer command.
pub fn execute(args: &PointerArgs, config: &ReplayConfig, json: bool) -> Result<()> {
    let settings = SourceSettings::resolve(&args.source, config)?;
    let source = open_input(&args.source.input, &settings)?;

    let session = PointerDecoder::with_sentinel(settings.sentinel)
        .decode_source(source)
        .with_context(|| {
            format!(
                "Failed to read pointer reports from '{}'",
                args.source.input.display()
            )
        })?;

    let min_points = args
        .min_points
        .unwrap_or(config.pointer.min_render_points);
    let document = StrokeDocument {
        drawable: render_filter(&session.strokes, min_points).len(),
        bounds: drawing_bounds(&session.strokes),
        stats: session.stats,
        strokes: session.strokes,
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.pointer.output.clone());
    let text =
        serde_json::to_string_pretty(&document).context("Failed to serialize strokes")?;
    std::fs::write(&output_path, text)
        .with_context(|| format!("Failed to write output file '{}'", output_path.display()))?;
    info!(path = %output_path.display(), strokes = document.strokes.len(), "wrote stroke data");

    output::print_pointer_summary(&document, &output_path, json);
    Ok(())
}
