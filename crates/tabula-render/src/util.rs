//! Text measurement, truncation, padding and tab expansion.
//!
//! Widths are display columns as reported by `unicode-width`, so CJK text
//! and emoji line up in tables.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Returns the display width of a string in terminal columns.
///
/// # Example
///
/// ```rust
/// use tabula_render::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string from the end to fit within a maximum display width.
///
/// If the string already fits, it is returned unchanged. Otherwise characters
/// are removed from the end and the ellipsis is appended, keeping the total
/// within `max_width`.
///
/// # Example
///
/// ```rust
/// use tabula_render::truncate_end;
///
/// assert_eq!(truncate_end("Hello World", 8, "…"), "Hello W…");
/// assert_eq!(truncate_end("Short", 10, "…"), "Short");
/// ```
pub fn truncate_end(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis_width = display_width(ellipsis);
    if max_width <= ellipsis_width {
        return truncate_to_display_width(ellipsis, max_width);
    }

    let mut result = truncate_to_display_width(s, max_width - ellipsis_width);
    result.push_str(ellipsis);
    result
}

/// Pads a string on the right (left-aligns) to reach the target width.
///
/// Strings already at least `width` wide are returned unchanged.
///
/// ```rust
/// use tabula_render::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// assert_eq!(pad_right("hello", 3), "hello");
/// ```
pub fn pad_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(current));
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    out
}

/// Replaces each tab with spaces up to the next multiple of `tab_width`.
///
/// A `tab_width` of zero removes tabs.
///
/// ```rust
/// use tabula_render::expand_tabs;
///
/// assert_eq!(expand_tabs("a\tb", 4), "a   b");
/// assert_eq!(expand_tabs("abcd\te", 4), "abcd    e");
/// ```
pub fn expand_tabs(s: &str, tab_width: usize) -> String {
    if !s.contains('\t') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + tab_width);
    let mut column = 0;
    for c in s.chars() {
        match c {
            '\t' if tab_width == 0 => {}
            '\t' => {
                let spaces = tab_width - column % tab_width;
                out.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += c.width().unwrap_or(0);
            }
        }
    }
    out
}

// --- Internal helpers ---

/// Truncate string to fit display width, keeping characters from the start.
fn truncate_to_display_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
