use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};
use uuid::Uuid;

use crate::calendar::format_day;
use crate::models::Project;
use crate::tui::app::App;

use super::render_scrollable_list;

/// Linear fallback view: projects intersecting the window sorted by
/// start date. Read and navigate only; creation and editing go through
/// the keyboard affordances, not drags.
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut item_line_map: Vec<Option<Uuid>> = Vec::new();

    for project in app.visible_projects() {
        let is_selected = app.selected_id() == Some(project.id);
        lines.push(render_project_line(app, project, is_selected));
        item_line_map.push(Some(project.id));
    }

    render_scrollable_list(frame, area, lines, &item_line_map, app.selected_id());
}

fn render_project_line(app: &App, project: &Project, is_selected: bool) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();

    // Selection indicator
    if is_selected {
        spans.push(Span::styled(" > ", app.theme.info));
    } else {
        spans.push(Span::raw("   "));
    }

    // Status icon
    spans.push(Span::styled(
        format!("{} ", project.status.icon()),
        app.theme.status_style(project.status),
    ));

    spans.push(Span::styled(
        project.title.clone(),
        app.theme.title,
    ));

    spans.push(Span::styled(
        format!(
            "  {} → {}",
            format_day(project.start_date),
            format_day(project.end_date)
        ),
        app.theme.muted,
    ));

    spans.push(Span::styled(
        format!(" ({}d)", project.duration_days()),
        app.theme.muted,
    ));

    let mut line = Line::from(spans);
    if is_selected {
        line = line.style(app.theme.selected);
    }
    line
}
