use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind, ViewMode};

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Status message or month overview
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.success,
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(&msg.text, style)]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    } else {
        let (planning, active, completed) = app.window_stats();
        let mut overview = vec![
            Span::raw("  "),
            Span::styled(format!("{}", planning), app.theme.muted),
            Span::styled(" planning", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", active), app.theme.info),
            Span::styled(" active", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", completed), app.theme.success),
            Span::styled(" completed", app.theme.muted),
        ];
        // The grid has no vertical scroll; point at the list view for
        // bars stacked below the visible rows
        let hidden = app.hidden_bar_count();
        if app.effective_view() == ViewMode::Gantt && hidden > 0 {
            overview.push(Span::styled(" · ", app.theme.muted));
            overview.push(Span::styled(
                format!("{} more below, [v] for list", hidden),
                app.theme.warning,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(overview)), chunks[0]);
    }

    // Keybindings line
    let mut keybindings = vec![("?", "Help"), ("←/→", "Month"), ("v", "View")];
    if app.effective_view() == ViewMode::Gantt && app.editable {
        keybindings.push(("drag", "Move/resize/create"));
    }
    keybindings.extend_from_slice(&[("n", "New"), ("s", "Status"), ("d", "Delete"), ("q", "Quit")]);

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
