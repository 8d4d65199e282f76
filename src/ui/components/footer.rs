//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.
//! Hints are separated by two spaces; the key part of each `key: action` hint
//! is emphasized.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

const HINT_SEPARATOR: &str = "  ";

/// Renders the footer help bar at the specified row.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed)
/// * `footer` - Footer information (keybinding text)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Truncation
///
/// Help text wider than the terminal is cut and printed without emphasis.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text_len = footer.keybindings.chars().count();
    position_cursor(row, 1);

    if text_len > cols {
        let help_text = truncate_chars(&footer.keybindings, cols);
        print!("{}{help_text}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        return row + 1;
    }

    let padding = (cols - text_len) / 2;
    print!("{}", " ".repeat(padding));

    for (i, hint) in footer.keybindings.split(HINT_SEPARATOR).enumerate() {
        if i > 0 {
            print!("{HINT_SEPARATOR}");
        }
        match hint.split_once(": ") {
            Some((key, action)) => {
                print!("{}{key}{}", Theme::fg(&theme.colors.header_fg), Theme::reset());
                print!("{}: {action}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
            }
            None => print!("{}{hint}{}", Theme::fg(&theme.colors.text_dim), Theme::reset()),
        }
    }

    print!("{}", " ".repeat(cols - padding - text_len));
    row + 1
}
