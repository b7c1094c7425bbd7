//! Box drawing characters for text output
//!
//! Used by the text report for its framed header and section rules.

use super::text::{display_width, pad_center};

/// Box drawing characters for a rectangular frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxChars {
    /// Single-line frame
    pub fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }

    /// Double-line frame for banners
    pub fn double() -> Self {
        Self {
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
            horizontal: '═',
            vertical: '║',
        }
    }

    /// Horizontal rule of `width` columns
    pub fn rule(&self, width: usize) -> String {
        std::iter::repeat(self.horizontal).take(width).collect()
    }

    /// Frame `title` centered in a box whose interior is `inner_width`
    /// columns wide. The interior grows when the title does not fit.
    pub fn frame(&self, title: &str, inner_width: usize) -> String {
        let inner_width = inner_width.max(display_width(title) + 2);
        let rule = self.rule(inner_width);
        format!(
            "{tl}{rule}{tr}\n{v}{body}{v}\n{bl}{rule}{br}",
            tl = self.top_left,
            tr = self.top_right,
            bl = self.bottom_left,
            br = self.bottom_right,
            v = self.vertical,
            body = pad_center(title, inner_width),
        )
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule() {
        assert_eq!(BoxChars::double().rule(3), "═══");
        assert_eq!(BoxChars::single().rule(0), "");
    }

    #[test]
    fn test_frame_layout() {
        let framed = BoxChars::double().frame("Hi", 6);
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines, vec!["╔══════╗", "║  Hi  ║", "╚══════╝"]);
    }

    #[test]
    fn test_frame_grows_for_long_title() {
        let framed = BoxChars::single().frame("A long title", 4);
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines[1], "│ A long title │");
        assert_eq!(display_width(lines[0]), display_width(lines[1]));
    }
}
