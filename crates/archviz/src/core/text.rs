//! Shared text utilities
//!
//! Width calculations use display columns, not bytes or chars, so emoji and
//! CJK text line up with box-drawing frames.

use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Center `text` in a field of `width` columns, padding with spaces.
///
/// Extra padding goes to the right. Text wider than the field is returned
/// unchanged.
///
/// # Example
/// ```
/// use archviz::core::pad_center;
///
/// assert_eq!(pad_center("ab", 6), "  ab  ");
/// assert_eq!(pad_center("ab", 5), " ab  ");
/// ```
pub fn pad_center(text: &str, width: usize) -> String {
    let text_width = display_width(text);
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Remove the common leading indentation of all non-blank lines
pub fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
