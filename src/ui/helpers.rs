//! Shared text layout utilities.
//!
//! All widths are counted in `char`s, not bytes, so names with accents or
//! symbols line up in table columns.

/// Cuts `text` to at most `width` chars, marking the cut with `~`.
///
/// # Example
///
/// ```rust
/// use character_finder::ui::helpers::truncate;
///
/// assert_eq!(truncate("Rick Sanchez", 6), "Rick ~");
/// assert_eq!(truncate("Rick", 6), "Rick");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('~');
    cut
}

/// Truncates and then right-pads `text` to exactly `width` chars.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centers `len` chars in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}
