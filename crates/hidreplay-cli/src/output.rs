//! Output formatting for CLI responses

use crate::commands::pointer::StrokeDocument;
use anyhow::Error;
use colored::*;
use hidreplay_keyboard::KeyboardSession;
use serde_json::json;
use std::path::Path;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

pub fn print_keyboard_summary(session: &KeyboardSession, output: &Path, print_text: bool, json: bool) {
    if json {
        let summary = json!({
            "success": true,
            "output": output.display().to_string(),
            "characters": session.text.chars().count(),
            "text": print_text.then(|| session.text.clone()),
            "stats": session.stats,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format summary as JSON: {}", e),
        }
        return;
    }

    if print_text {
        println!("{}", "Reconstructed text:".bold());
        println!("{}", "=".repeat(50));
        println!("{}", session.text);
        println!("{}", "=".repeat(50));
    }

    let stats = &session.stats;
    println!(
        "{} {} characters from {} reports ({} malformed, {} unmapped, {} repeat frames)",
        "Decoded".green().bold(),
        session.text.chars().count(),
        stats.reports,
        stats.malformed,
        stats.unmapped,
        stats.debounced
    );
    println!("Saved to {}", output.display().to_string().cyan());
}

pub fn print_pointer_summary(document: &StrokeDocument, output: &Path, json: bool) {
    if json {
        let summary = json!({
            "success": true,
            "output": output.display().to_string(),
            "strokes": document.strokes.len(),
            "drawable": document.drawable,
            "bounds": document.bounds,
            "stats": document.stats,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format summary as JSON: {}", e),
        }
        return;
    }

    println!(
        "{} {} strokes, {} click packets",
        "Drawing complete:".green().bold(),
        document.strokes.len(),
        document.stats.pressed_samples
    );
    println!(
        "  {} drawable, {} samples, {} skipped records",
        document.drawable, document.stats.samples, document.stats.skipped
    );
    if let Some(bounds) = document.bounds {
        println!(
            "  extent ({}, {}) .. ({}, {})",
            bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
        );
    }
    println!("Saved to {}", output.display().to_string().cyan());
}
