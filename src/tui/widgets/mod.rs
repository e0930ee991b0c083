pub mod gantt_view;
pub mod help_popup;
pub mod input_dialog;
pub mod list_view;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use uuid::Uuid;

/// Shared scrollable list renderer used by the list view.
pub(crate) fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    item_line_map: &[Option<Uuid>],
    selected_id: Option<Uuid>,
) {
    // Fall back to the top of the list when the selected item is not
    // visible (e.g., nothing selected).
    let selected_line = item_line_map
        .iter()
        .position(|id| *id == selected_id)
        .unwrap_or(0);

    let scroll_offset = if selected_line >= area.height as usize {
        selected_line.saturating_sub(area.height as usize / 2)
    } else {
        0
    };

    let paragraph = Paragraph::new(lines.clone()).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);

    if lines.len() > area.height as usize {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(lines.len()).position(scroll_offset);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
