use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(56, 19, frame.area());

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let bindings: &[(&str, &str)] = &[
        ("←/h, →/l", "Previous / next month"),
        ("↑/k, ↓/j", "Select previous / next project"),
        ("v", "Toggle gantt / list view"),
        ("Enter", "Edit selected project"),
        ("n", "New project on the 1st of the month"),
        ("s", "Cycle status of selected project"),
        ("d", "Delete selected project"),
        ("q", "Quit"),
        ("", ""),
        ("Mouse (gantt view)", ""),
        ("Drag on empty space", "Create a project over the range"),
        ("Drag a bar", "Move the project"),
        ("Drag a bar's edge", "Resize start or end"),
        ("Click a bar", "Edit the project"),
    ];

    let mut text = vec![Line::from("")];
    for (key, desc) in bindings {
        if key.is_empty() && desc.is_empty() {
            text.push(Line::from(""));
            continue;
        }
        if desc.is_empty() {
            text.push(Line::from(Span::styled(
                format!("  {}", key),
                app.theme.header,
            )));
            continue;
        }
        text.push(Line::from(vec![
            Span::styled(format!("  {:<22}", key), app.theme.info),
            Span::styled((*desc).to_string(), app.theme.muted),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "  Press any key to close",
        app.theme.muted,
    )));

    frame.render_widget(Paragraph::new(text), inner);
}
