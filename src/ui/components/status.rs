//! Status line component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line, or a blank line when there is nothing to report.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = theme.status_color(status.kind);
    let message = truncate_chars(&format!(" {}", status.message), cols);

    print!("{}", Theme::fg(color));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(message.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
