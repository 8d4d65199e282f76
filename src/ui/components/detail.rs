//! Detail overlay component renderer.
//!
//! Draws a bordered box over the table listing everything known about the
//! selected book.

use crate::ui::helpers::{pad_chars, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const OVERLAY_MARGIN: usize = 4;

/// Renders the detail overlay between `top` and `bottom` (inclusive).
///
/// Lines that do not fit are dropped from the end.
pub fn render_detail(top: usize, bottom: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(OVERLAY_MARGIN * 2);
    let inner_width = box_width.saturating_sub(4);
    if inner_width == 0 || bottom <= top + 1 {
        return;
    }

    let mut lines: Vec<(String, &str)> = vec![
        (detail.title.clone(), theme.colors.header_fg.as_str()),
        (format!("by {}", detail.authors), theme.colors.text_normal.as_str()),
        (String::new(), theme.colors.text_normal.as_str()),
        (format!("Published: {}", detail.published), theme.colors.text_normal.as_str()),
    ];
    if let Some(publisher) = &detail.publisher {
        lines.push((format!("Publisher: {publisher}"), theme.colors.text_normal.as_str()));
    }
    if let Some(pages) = &detail.pages {
        lines.push((format!("Length:    {pages}"), theme.colors.text_normal.as_str()));
    }
    if let Some(languages) = &detail.languages {
        lines.push((format!("Languages: {languages}"), theme.colors.text_normal.as_str()));
    }
    if !detail.subjects.is_empty() {
        lines.push((format!("Subjects:  {}", detail.subjects.join(", ")), theme.colors.text_dim.as_str()));
    }
    lines.push((format!("Cover:     {}", detail.cover_url), theme.colors.text_dim.as_str()));
    lines.push((String::new(), theme.colors.text_normal.as_str()));
    if detail.is_bookmarked {
        lines.push(("★ On your reading list".to_string(), theme.colors.bookmark_fg.as_str()));
    } else {
        lines.push(("Press space to save this book".to_string(), theme.colors.text_dim.as_str()));
    }

    let border = &theme.colors.search_bar_border;
    let indent = " ".repeat(OVERLAY_MARGIN);

    position_cursor(top, 1);
    print!("{indent}{}┌{}┐{}", Theme::fg(border), "─".repeat(box_width.saturating_sub(2)), Theme::reset());

    let capacity = bottom - top - 1;
    let mut row = top + 1;
    for (text, color) in lines.iter().take(capacity) {
        position_cursor(row, 1);
        print!("{indent}{}│ ", Theme::fg(border));
        print!("{}", Theme::fg(color));
        print!("{}", pad_chars(&truncate_chars(text, inner_width), inner_width));
        print!("{} │{}", Theme::fg(border), Theme::reset());
        row += 1;
    }

    position_cursor(row, 1);
    print!("{indent}{}└{}┘{}", Theme::fg(border), "─".repeat(box_width.saturating_sub(2)), Theme::reset());
}
