//! Header component renderer.
//!
//! This module renders the title bar: the view title on the left and the
//! active filters on the right, with theme-aware colors and optional
//! background styling.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header information (title and filter summary)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  TITLE (n) [padding] Genre: All  Language: English
/// ```
///
/// The filter summary is dropped when the terminal is too narrow for both.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate_chars(&header.title, cols);
    let title_len = title.chars().count();
    let filters_len = header.filters.chars().count();
    let show_filters = title_len + filters_len + 2 <= cols;

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    if show_filters {
        let gap = cols.saturating_sub(title_len + filters_len + 1);
        print!("{}", " ".repeat(gap));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{} ", header.filters);
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(title_len)));
    }

    print!("{}", Theme::reset());
    row + 1
}
