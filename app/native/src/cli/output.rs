//! CLI output formatting utilities.

use std::fmt::Write as _;

use colored::Colorize;

use crate::constants::DAILY_IMAGE_TARGET;
use crate::modules::rotation::{RotationState, RotationStatus};

/// Prints JSON with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &serde_json::Value) {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    println!("{out}");
}

fn write_value(out: &mut String, value: &serde_json::Value, depth: usize) {
    use serde_json::Value;

    let indent = "  ".repeat(depth + 1);
    let closing = "  ".repeat(depth);

    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push_str(&"[".bold().to_string());
            for (i, item) in items.iter().enumerate() {
                out.push('\n');
                out.push_str(&indent);
                write_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
            }
            let _ = write!(out, "\n{closing}{}", "]".bold());
        }
        Value::Object(map) => {
            out.push_str(&"{".bold().to_string());
            for (i, (key, item)) in map.iter().enumerate() {
                let _ = write!(out, "\n{indent}{}: ", quoted(key).cyan());
                write_value(out, item, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
            }
            let _ = write!(out, "\n{closing}{}", "}".bold());
        }
    }
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Truncates a string to a maximum number of characters, adding an ellipsis.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{kept}…")
}

/// One-line status such as `Impressionism · 3/48 · next in 12:34 · running`.
#[must_use]
pub fn status_summary(status: &RotationStatus) -> String {
    if !status.is_active() {
        return "No rotation active".to_string();
    }

    let collection = status.collection.as_deref().unwrap_or("Unknown collection");
    let timing = match status.state {
        RotationState::Paused => format!("paused at {}", status.countdown()),
        _ => format!("next in {}", status.countdown()),
    };

    format!("{collection} · {} · {timing} · {}", status.position(), status.state)
}

/// Prints a status block: the summary line, current image and last error.
pub fn print_status(status: &RotationStatus) {
    let summary = status_summary(status);
    let summary = match status.state {
        RotationState::Running => summary.green().bold(),
        RotationState::Paused => summary.yellow().bold(),
        RotationState::Inactive => summary.dimmed(),
    };
    println!("{summary}");

    if let Some(name) = status.current_image_name() {
        println!("  {} {}", "Image:".dimmed(), truncate(&name, 72));
    }
    if let Some(error) = &status.last_error {
        println!("  {} {error}", "Last error:".red());
    }
}

/// Text progress bar toward the daily image target, e.g. `██████░░░░ 30/48`.
#[must_use]
pub fn progress_bar(images: usize, width: usize) -> String {
    let filled = (images.min(DAILY_IMAGE_TARGET) * width) / DAILY_IMAGE_TARGET;
    format!(
        "{}{} {images}/{DAILY_IMAGE_TARGET}",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

/// Formats a boolean as a coloured tick or cross.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
