//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: View title and active filters
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, live text)
//! - [`filters`]: Genre chips and the active language
//! - [`table`]: Book list with columns (TITLE, AUTHOR, YEAR, SUBJECTS)
//! - [`empty`]: Empty state message in place of the table
//! - [`status`]: Loading, error and summary line
//! - [`detail`]: Overlay describing the selected book
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, optional]
//! [Filter Panel - 3 lines, optional]
//! [Table Headers]
//! [Table Rows | Empty State]
//! [Blank padding to fill screen]
//! [Status]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod filters;
mod footer;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use empty::render_empty_state;
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout for a view model.
///
/// # Parameters
///
/// * `vm` - View model with display items and metadata
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
///
/// # Line Accounting
///
/// Reserves 7 lines for chrome (blank, header, 2 borders, table header row,
/// status, footer) plus 3 for each optional panel, matching the row budget
/// used by `AppState::compute_viewmodel`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if let Some(panel) = &vm.filter_panel {
        current_row = render_filter_panel(current_row, panel, theme, cols);
    }
    current_row = render_table_headers(current_row, theme, cols);
    let body_top = current_row;

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    if let Some(detail) = &vm.detail {
        render_detail(body_top, status_row.saturating_sub(1), detail, theme, cols);
    }

    render_status(status_row, vm.status.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
