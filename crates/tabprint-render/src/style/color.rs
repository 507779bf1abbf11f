//! Named tints and the color enable policy.

use std::fmt;
use std::str::FromStr;

use console::Style;
use serde::{Deserialize, Serialize};

use crate::terminal::TerminalInfo;

/// A named color or text attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Cyan,
    Blue,
    Yellow,
    Green,
    Red,
    White,
    Underline,
    Bold,
}

impl Tint {
    /// The SGR escape sequence for this tint.
    pub fn code(self) -> &'static str {
        match self {
            Tint::Cyan => "\x1b[36m",
            Tint::Blue => "\x1b[34m",
            Tint::Yellow => "\x1b[33m",
            Tint::Green => "\x1b[32m",
            Tint::Red => "\x1b[31m",
            Tint::White => "\x1b[37m",
            Tint::Underline => "\x1b[4m",
            Tint::Bold => "\x1b[1m",
        }
    }

    /// Applies this tint to a `console::Style`.
    pub fn apply(self, style: Style) -> Style {
        match self {
            Tint::Cyan => style.cyan(),
            Tint::Blue => style.blue(),
            Tint::Yellow => style.yellow(),
            Tint::Green => style.green(),
            Tint::Red => style.red(),
            Tint::White => style.white(),
            Tint::Underline => style.underlined(),
            Tint::Bold => style.bold(),
        }
    }
}

/// When to emit escape sequences.
///
/// - `Always` - emit even when piped
/// - `Never` - plain text
/// - `Auto` - emit only for an interactive terminal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Always,
    Never,
    #[default]
    Auto,
}

impl ColorMode {
    /// Resolves this mode against a terminal.
    pub fn enabled(self, terminal: &TerminalInfo) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal.interactive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Always => "always",
            ColorMode::Never => "never",
            ColorMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            other => Err(format!(
                "Invalid color mode: '{}'. Expected 'always', 'never' or 'auto'.",
                other
            )),
        }
    }
}
