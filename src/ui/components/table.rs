//! Table component renderer.
//!
//! This module renders the book list as a table with TITLE, AUTHOR, YEAR and
//! SUBJECTS columns behind a reading-list marker. It supports selection
//! highlighting and query-term highlighting in titles.

use crate::ui::helpers::{self, pad_chars, position_cursor, ColumnLayout};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const BOOKMARK_MARKER: &str = "★";

/// Renders the table column headers at the specified row.
///
/// # Parameters
///
/// * `row` - Row position to render the headers (1-indexed)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let layout = ColumnLayout::for_width(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{}{} {} {}{}",
        " ".repeat(layout.marker),
        pad_chars("TITLE", layout.title),
        pad_chars("AUTHOR", layout.author),
        pad_chars("YEAR", layout.year),
        if layout.subjects > 0 { "SUBJECTS" } else { "" },
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `items` - List of display items to render
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let layout = ColumnLayout::for_width(cols);
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, &layout, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// # Layout
///
/// ```text
/// ★  TITLE [pad] AUTHOR [pad] YEAR [pad] SUBJECTS [padding to fill line]
/// ```
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Query-term highlights (unless selected)
/// 3. Normal text color
///
/// The row is padded to fill the entire terminal width to ensure consistent
/// selection background rendering.
fn render_table_row(
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    layout: &ColumnLayout,
    cols: usize,
) -> usize {
    let base = || {
        if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    position_cursor(row, 1);
    print!("{}", base());

    if item.is_bookmarked {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.bookmark_fg));
        }
        print!("{}", pad_chars(BOOKMARK_MARKER, layout.marker));
        print!("{}", base());
    } else {
        print!("{}", " ".repeat(layout.marker));
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(layout.title.saturating_sub(item.title.chars().count())));

    print!(" {}", pad_chars(&item.author, layout.author));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!(" {}", pad_chars(&item.year, layout.year));
    print!("{}", item.subjects);

    let line_len = layout.marker
        + layout.title
        + layout.author
        + layout.year
        + 2
        + item.subjects.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
