//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor positioning, column layout, character-safe truncation
//! and query-term highlighting with proper ANSI escape sequence management.
//!
//! # Features
//!
//! - **Column Layout**: Splits the terminal width into the book table columns
//! - **Truncation**: Shortens text to a column width with an ellipsis
//! - **Match Highlighting**: Renders text with highlighted character ranges
//! - **UTF-8 Safe**: Operates on character indices, not byte indices
//!
//! # Example
//!
//! ```rust
//! use bookhunt::ui::helpers::{coalesce_ranges, truncate_chars};
//!
//! assert_eq!(truncate_chars("The Left Hand of Darkness", 12), "The Left ...");
//! assert_eq!(coalesce_ranges(&[0, 1, 2, 5]), vec![(0, 3), (5, 6)]);
//! ```

use crate::ui::theme::Theme;

const ELLIPSIS: &str = "...";

/// Widths of the book table columns, in characters.
///
/// The bookmark marker and year columns are fixed; the title takes two fifths
/// of the width and subjects take what remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub marker: usize,
    pub title: usize,
    pub author: usize,
    pub year: usize,
    pub subjects: usize,
}

impl ColumnLayout {
    const MARKER: usize = 3;
    const YEAR: usize = 9;
    const MIN_TITLE: usize = 16;
    const MAX_AUTHOR: usize = 24;

    /// Lays out the columns for a terminal `cols` characters wide.
    #[must_use]
    pub fn for_width(cols: usize) -> Self {
        let usable = cols.saturating_sub(Self::MARKER + Self::YEAR);
        let title = (usable * 2 / 5).max(Self::MIN_TITLE);
        let author = (usable / 4).min(Self::MAX_AUTHOR);
        let subjects = usable.saturating_sub(title + author + 2);

        Self {
            marker: Self::MARKER,
            title,
            author,
            year: Self::YEAR,
            subjects,
        }
    }
}

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Parameters
///
/// * `row` - Target row (1-indexed)
/// * `col` - Target column (1-indexed, typically 1 for start of line)
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
///
/// Widths too small to hold the ellipsis cut without one.
#[must_use]
pub fn truncate_chars(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }

    let mut truncated: String = text.chars().take(width - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad_chars(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Merges sorted matched character indices into half-open ranges.
#[must_use]
pub fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}

/// Renders text with highlighted character ranges for query matches.
///
/// Splits the text into highlighted and normal sections based on the provided
/// character ranges. Highlighted sections use match highlight colors unless the
/// item is selected, in which case selection colors take precedence.
///
/// # Parameters
///
/// * `text` - The text to render
/// * `ranges` - Character index ranges to highlight `(start, end)` (inclusive start, exclusive end)
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the item is currently selected (disables match highlighting)
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("Dune", 10), "Dune");
        assert_eq!(truncate_chars("Ça m'énerve beaucoup", 8), "Ça m'...");
        assert_eq!(truncate_chars("Dune", 2), "Du");
    }

    #[test]
    fn padding_fills_width() {
        assert_eq!(pad_chars("ab", 4), "ab  ");
        assert_eq!(pad_chars("abcdef", 4), "abcdef");
    }

    #[test]
    fn adjacent_indices_merge() {
        assert_eq!(coalesce_ranges(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(coalesce_ranges(&[2, 3, 4, 8, 9]), vec![(2, 5), (8, 10)]);
    }

    #[test]
    fn layout_fills_wide_terminals() {
        let layout = ColumnLayout::for_width(120);
        assert_eq!(layout.title, 43);
        assert_eq!(layout.author, 24);
        let total = layout.marker + layout.title + layout.author + layout.year + layout.subjects + 2;
        assert_eq!(total, 120);
    }

    #[test]
    fn layout_keeps_minimum_title() {
        let layout = ColumnLayout::for_width(30);
        assert_eq!(layout.title, 16);
        assert_eq!(layout.subjects, 0);
    }
}
