//! Terminal colour theme
//!
//! Green for replies, red for failures, cyan for run-level notices. Every
//! helper returns the text untouched when colour is disabled.

use crossterm::style::Stylize;

#[must_use]
pub fn success(text: &str, enabled: bool) -> String {
    if enabled {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

#[must_use]
pub fn failure(text: &str, enabled: bool) -> String {
    if enabled {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

#[must_use]
pub fn info(text: &str, enabled: bool) -> String {
    if enabled {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}
