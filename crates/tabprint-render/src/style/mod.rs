//! ANSI color helpers.
//!
//! A [`Palette`] is the only place escape codes are produced. Whether it emits
//! anything is decided once, from a [`ColorMode`] and a
//! [`TerminalInfo`](crate::TerminalInfo), and then carried explicitly:
//!
//! ```rust
//! use tabprint_render::{ColorMode, Palette, TerminalInfo, Tint};
//!
//! let palette = Palette::for_terminal(ColorMode::Always, &TerminalInfo::piped());
//! assert_eq!(palette.paint(Tint::Red, "down"), "\x1b[31mdown\x1b[0m");
//!
//! let plain = Palette::plain();
//! assert_eq!(plain.paint(Tint::Red, "down"), "down");
//! ```

mod color;

pub use color::{ColorMode, Tint};

use std::fmt::Display;

use console::Style;

use crate::terminal::TerminalInfo;

const RESET: &str = "\x1b[0m";

/// Conditionally emits ANSI escape sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// A palette that never emits escape codes.
    pub fn plain() -> Self {
        Palette { enabled: false }
    }

    pub fn for_terminal(mode: ColorMode, terminal: &TerminalInfo) -> Self {
        Palette::new(mode.enabled(terminal))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The bare escape code for `tint`, or `""` when disabled.
    pub fn code(&self, tint: Tint) -> &'static str {
        if self.enabled {
            tint.code()
        } else {
            ""
        }
    }

    /// The reset sequence, or `""` when disabled.
    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }

    /// Wraps `msg` in `tint` and a reset.
    pub fn paint(&self, tint: Tint, msg: impl Display) -> String {
        self.styled(tint.apply(Style::new()), msg)
    }

    /// Bold text in `tint`, as used for table headers.
    pub fn header(&self, tint: Tint, msg: impl Display) -> String {
        self.styled(tint.apply(Style::new().bold()), msg)
    }

    /// Box-drawing characters are painted white.
    pub fn border(&self, msg: impl Display) -> String {
        self.paint(Tint::White, msg)
    }

    fn styled(&self, style: Style, msg: impl Display) -> String {
        style.force_styling(self.enabled).apply_to(msg).to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_palette_is_transparent() {
        let p = Palette::plain();
        assert_eq!(p.paint(Tint::Green, "ok"), "ok");
        assert_eq!(p.header(Tint::Yellow, "Count"), "Count");
        assert_eq!(p.code(Tint::Blue), "");
        assert_eq!(p.reset(), "");
    }

    #[test]
    fn enabled_palette_wraps_text() {
        let p = Palette::new(true);
        assert_eq!(p.paint(Tint::Cyan, "x"), "\x1b[36mx\x1b[0m");
        assert_eq!(p.code(Tint::Underline), "\x1b[4m");
        assert_eq!(p.reset(), "\x1b[0m");
    }

    #[test]
    fn header_is_bold_and_tinted() {
        let out = Palette::new(true).header(Tint::Yellow, "Size");
        assert!(out.contains("\x1b[33m"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("Size"));
        assert!(out.ends_with(RESET));
    }
}
