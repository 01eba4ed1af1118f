//! Terminal capability detection and styling

use gatofit::domain::{Direction, Status};
use owo_colors::{colors::css, OwoColorize};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Good news (teal)
    fn success(&self) -> String;
    /// Needs attention (rose)
    fn warning(&self) -> String;
    /// Neutral highlight (indigo)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, |s| s.fg::<css::LightSeaGreen>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, |s| s.fg::<css::Crimson>().to_string())
    }

    fn info(&self) -> String {
        paint(self, |s| s.fg::<css::MediumSlateBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |s| s.dimmed().to_string())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Formats a weight change with its sign.
///
/// Gains are shown as warnings and losses as good news; no change is plain.
pub fn signed_change(delta: f64) -> String {
    let text = format!("{delta:+.2} kg");
    match Direction::of(delta) {
        Direction::Increase => text.warning(),
        Direction::Decrease => text.success(),
        Direction::Unchanged => format!("{:.2} kg", delta.abs()),
    }
}

/// Formats a change as an arrow and its magnitude, coloured like
/// [`signed_change`].
pub fn trend_marker(delta: f64) -> String {
    let direction = Direction::of(delta);
    let text = format!("{} {:.2}", direction.arrow(), delta.abs());
    match direction {
        Direction::Increase => text.warning(),
        Direction::Decrease => text.success(),
        Direction::Unchanged => text.dim(),
    }
}

/// A status label with an icon.
pub fn status_label(status: Status) -> String {
    match status {
        Status::Healthy => format!("✅ {status}").success(),
        Status::Warning => format!("⚠️  {status}").warning(),
        Status::Unknown => format!("❔ {status}").dim(),
    }
}
