use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

/// Modal single-line text input with a title and hint.
pub fn render_input_dialog(
    frame: &mut Frame,
    app: &App,
    title: &str,
    hint: &str,
    input: &str,
    cursor: usize,
) {
    let area = centered_rect(60, 7, frame.area());

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Input line with a visible cursor cell
    let chars: Vec<char> = input.chars().collect();
    let before: String = chars.iter().take(cursor).collect();
    let at: String = chars
        .get(cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = chars.iter().skip(cursor + 1).collect();

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::raw(before),
            Span::styled(at, Style::default().bg(Color::White).fg(Color::Black)),
            Span::raw(after),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(hint, app.theme.muted),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[Enter] Confirm  [Esc] Cancel", app.theme.muted),
        ]),
    ];

    frame.render_widget(Paragraph::new(text), inner);
}

/// Simple yes/no confirmation popup.
pub fn render_confirm_dialog(frame: &mut Frame, app: &App, message: &str) {
    let area = centered_rect(44, 7, frame.area());

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {}", message))),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[Enter]", app.theme.title),
            Span::raw(" Confirm  "),
            Span::styled("[Esc]", app.theme.title),
            Span::raw(" Cancel"),
        ]),
    ];

    frame.render_widget(Paragraph::new(text), inner);
}
