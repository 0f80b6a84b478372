// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! CLI output formatting with colors and styling.
//!
//! Respects NO_COLOR and FORCE_COLOR environment variables.
//! Colors are automatically disabled when output is piped.

use colored::{ColoredString, Colorize};

/// Initialize color support based on environment and `--no-color`.
/// Call once at startup.
pub fn init(no_color: bool) {
    if no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

// === Error Output ===

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

pub fn hint_label() -> ColoredString {
    "hint".cyan()
}

pub fn hint_text(msg: &str) -> ColoredString {
    msg.dimmed()
}

// === Banners ===

pub fn banner_ok(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} OK", phase).green().bold(),
        "===".dimmed()
    )
}

pub fn banner_fail(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} FAILED", phase).red().bold(),
        "===".dimmed()
    )
}

// === Listing ===

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn demo_name(name: &str) -> ColoredString {
    name.green()
}

// === IR ===

/// Dim the block structure so the ops stand out.
pub fn ir_line(line: &str) -> String {
    let trimmed = line.trim_start();
    if trimmed == "}" || trimmed.starts_with("func ") || trimmed.starts_with("^bb") {
        line.dimmed().to_string()
    } else if trimmed.starts_with("affine.for") {
        line.cyan().to_string()
    } else {
        line.to_string()
    }
}
