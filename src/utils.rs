//! Supporting helpers: colored stderr prefixes.

use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal CLI errors printed to stderr.
pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for friendly notes printed to stderr.
pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".bright_black().to_string()
    } else {
        "note:".to_string()
    }
}

/// Prefix for informational stderr lines.
pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}
