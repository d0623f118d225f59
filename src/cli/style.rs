//! Terminal styling helpers
//!
//! Colors go through owo-colors with stream-aware support detection so
//! output degrades cleanly when piped or redirected.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use terminal_link::Link;

/// Check mark glyph
pub const CHECK: &str = "✓";
/// Cross glyph
pub const CROSS: &str = "✗";

/// Styling extensions used by command output
pub trait Stylize: std::fmt::Display + Sized {
    /// De-emphasized secondary text
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed().to_string())
            .to_string()
    }

    /// Highlighted value
    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan().to_string())
            .to_string()
    }

    /// Bold lead-in text
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold().to_string())
            .to_string()
    }

    /// Positive result
    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green().to_string())
            .to_string()
    }

    /// Something went wrong but the run continues
    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow().to_string())
            .to_string()
    }
}

impl<T: std::fmt::Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Yellow cross
pub fn cross() -> String {
    CROSS.warn()
}

/// Style for the batch progress bar
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Render `text` as a terminal hyperlink to `url` when supported
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::supports_hyperlinks() {
        Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}
