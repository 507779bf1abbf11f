//! ANSI-aware text measurement.
//!
//! Widths here are *visible* widths: the number of characters left after
//! removing ANSI CSI escape sequences. Truncation keeps escape sequences that
//! start before the cut so that color codes survive.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Matches a CSI sequence introduced by `ESC [` or the 8-bit `0x9B`.
pub static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\x{9B}|\x1B\[)[0-?]*[ -/]*[@-~]").expect("ANSI pattern is valid")
});

/// Removes all ANSI CSI sequences from `s`.
///
/// ```rust
/// use tabprint_render::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[1m\x1b[32mok\x1b[0m"), "ok");
/// assert_eq!(strip_ansi("plain"), "plain");
/// ```
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(s, "")
}

/// Number of visible characters in `s`.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Truncates `s` to `max_len` visible characters, ending with `…` when cut.
///
/// Escape sequences are scanned left to right. A sequence that starts at or
/// before `max_len + budget - 1` (where `budget` is the length of the
/// sequences already counted) is added to the budget; the first one starting
/// after that point ends the scan. If `s` is longer than `max_len + budget`
/// characters it is cut to `max_len + budget - 1` and the ellipsis appended.
///
/// A cut that lands inside an escape sequence is not repaired.
///
/// ```rust
/// use tabprint_render::visible_truncate;
///
/// assert_eq!(visible_truncate("Hello World", 6), "Hello…");
/// assert_eq!(visible_truncate("Hello", 6), "Hello");
/// assert_eq!(
///     visible_truncate("\x1b[31mHello World\x1b[0m", 6),
///     "\x1b[31mHello…"
/// );
/// ```
pub fn visible_truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    let mut budget = 0usize;
    let mut scanned_bytes = 0usize;
    let mut scanned_chars = 0usize;

    for m in ANSI_PATTERN.find_iter(s) {
        scanned_chars += s[scanned_bytes..m.start()].chars().count();
        scanned_bytes = m.start();
        // start > max_len + budget - 1, without underflow
        if scanned_chars + 1 > max_len + budget {
            break;
        }
        budget += m.as_str().chars().count();
    }

    let limit = max_len + budget;
    if s.chars().count() <= limit {
        return Cow::Borrowed(s);
    }

    let mut out: String = s.chars().take(limit.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Truncates a table cell; `None` means the column is never truncated.
pub fn truncate_cell(s: &str, limit: Option<usize>) -> Cow<'_, str> {
    match limit {
        Some(max_len) => visible_truncate(s, max_len),
        None => Cow::Borrowed(s),
    }
}

/// Right-pads `s` with spaces to `width` visible characters.
pub fn pad_visible(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_none() {
        assert_eq!(strip_ansi(""), "");
        assert_eq!(strip_ansi("abc"), "abc");
    }

    #[test]
    fn test_strip_ansi_multiple() {
        assert_eq!(strip_ansi("\x1b[36ma\x1b[0m-\x1b[4mb\x1b[0m"), "a-b");
    }

    #[test]
    fn test_strip_ansi_eight_bit_csi() {
        assert_eq!(strip_ansi("\u{9b}31mred\u{9b}0m"), "red");
    }

    #[test]
    fn test_strip_ansi_parameters() {
        assert_eq!(strip_ansi("\x1b[38;5;208mx\x1b[0m"), "x");
    }

    #[test]
    fn test_visible_width() {
        assert_eq!(visible_width("\x1b[1mBold\x1b[0m"), 4);
        assert_eq!(visible_width("日本"), 2);
    }

    #[test]
    fn test_truncate_no_truncation() {
        assert_eq!(visible_truncate("Hello", 10), "Hello");
        assert_eq!(visible_truncate("Hello", 5), "Hello");
        assert_eq!(visible_truncate("", 5), "");
    }

    #[test]
    fn test_truncate_one_over() {
        assert_eq!(visible_truncate("123456", 5), "1234…");
    }

    #[test]
    fn test_truncate_keeps_leading_codes() {
        let s = "\x1b[32mabcdefgh\x1b[0m";
        // Opening code counts toward the budget; the reset starts past the cut.
        assert_eq!(visible_truncate(s, 4), "\x1b[32mabc…");
    }

    #[test]
    fn test_truncate_colored_fits() {
        let s = "\x1b[32mabc\x1b[0m";
        assert_eq!(visible_truncate(s, 4), s);
    }

    #[test]
    fn test_truncate_colored_exact_width_drops_reset() {
        // The trailing reset starts past max_len + budget - 1, so it is not
        // counted and the text is cut one character early.
        let s = "\x1b[32mabc\x1b[0m";
        assert_eq!(visible_truncate(s, 3), "\x1b[32mab…");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(visible_truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_truncate_zero_budget() {
        assert_eq!(visible_truncate("Hello", 0), "…");
        assert_eq!(visible_truncate("", 0), "");
    }

    #[test]
    fn test_truncate_cell_unlimited() {
        let long = "x".repeat(200);
        assert_eq!(truncate_cell(&long, None), long);
        assert_eq!(visible_width(&truncate_cell(&long, Some(10))), 10);
    }

    #[test]
    fn test_pad_visible_ignores_codes() {
        let padded = pad_visible("\x1b[31mab\x1b[0m", 4);
        assert_eq!(padded, "\x1b[31mab\x1b[0m  ");
        assert_eq!(visible_width(&padded), 4);
    }

    #[test]
    fn test_pad_visible_wider_than_width() {
        assert_eq!(pad_visible("abcdef", 3), "abcdef");
    }
}
