use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::format_day;

use super::app::{App, PopupState, ViewMode};
use super::widgets::{
    gantt_view::render_gantt_view,
    help_popup::render_help_popup,
    input_dialog::{render_confirm_dialog, render_input_dialog},
    list_view::render_list_view,
    status_bar::render_status_bar,
};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = layout_chunks(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if let Some(ref popup) = app.popup {
        render_popup(frame, app, popup);
    }
}

fn layout_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(2), // Status bar
        ])
        .split(area)
}

/// Screen region the grid/list content occupies for a terminal of the
/// given size. Mouse hit-testing resolves against this exact region,
/// so rendering and hit tests can never disagree about the layout.
pub fn content_inner(size: Rect) -> Rect {
    let content = layout_chunks(size)[1];
    Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .inner(content)
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.effective_view() {
        ViewMode::Gantt => "Gantt",
        ViewMode::List => "List",
    };

    let mut spans = vec![
        Span::styled("  monthline", app.theme.title),
        Span::raw("  "),
        Span::styled(app.window.title(), app.theme.header),
        Span::raw("  "),
        Span::styled(format!("[{}]", view_name), app.theme.muted),
    ];

    if !app.editable {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[read-only]", app.theme.warning));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(app.theme.border);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.effective_view() {
        ViewMode::Gantt => render_gantt_view(frame, app, inner),
        ViewMode::List => {
            if app.visible_projects().is_empty() {
                let paragraph = Paragraph::new("No projects this month.")
                    .style(app.theme.muted)
                    .alignment(ratatui::layout::Alignment::Center);
                frame.render_widget(paragraph, inner);
            } else {
                render_list_view(frame, app, inner);
            }
        }
    }
}

fn render_popup(frame: &mut Frame, app: &App, popup: &PopupState) {
    match popup {
        PopupState::Help => render_help_popup(frame, app),
        PopupState::CreateProject {
            start,
            end,
            input,
            cursor,
        } => {
            let title = if start == end {
                format!("New Project · {}", format_day(*start))
            } else {
                format!("New Project · {} – {}", format_day(*start), format_day(*end))
            };
            render_input_dialog(frame, app, &title, "Enter a title", input, *cursor);
        }
        PopupState::EditProject { input, cursor, .. } => {
            render_input_dialog(frame, app, "Edit Project", "Enter a new title", input, *cursor);
        }
        PopupState::ConfirmDelete { id } => {
            let title = app
                .projects
                .iter()
                .find(|p| p.id == *id)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| "project".to_string());
            render_confirm_dialog(frame, app, &format!("Delete \"{}\"?", title));
        }
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
