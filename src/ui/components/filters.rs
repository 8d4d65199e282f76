//! Filter panel component renderer.
//!
//! Shows every genre as a chip with the active one highlighted, and the active
//! language below.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterPanelInfo;

/// Renders the filter panel at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3: genres, language, separator)
pub fn render_filter_panel(row: usize, panel: &FilterPanelInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" Genre: ");

    let mut used = 8;
    for chip in &panel.genres {
        let width = chip.label.chars().count() + 3;
        if used + width > cols {
            break;
        }
        if chip.is_active {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
            print!(" {} ", chip.label);
            print!("{}", Theme::reset());
            print!("{} ", Theme::fg(&theme.colors.text_dim));
        } else {
            print!(" {}  ", chip.label);
        }
        used += width;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());

    let language = truncate_chars(&format!(" Language: {}  (h/l to change)", panel.language), cols);
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{language}");
    print!("{}", " ".repeat(cols.saturating_sub(language.chars().count())));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());

    row + 3
}
