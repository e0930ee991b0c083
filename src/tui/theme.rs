use ratatui::style::{Color, Modifier, Style};

use crate::models::ProjectStatus;

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub muted: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    pub selected: Style,
    pub border: Style,
    pub title: Style,
    pub header: Style,
    /// Faint day-grid dots behind the bars
    pub grid: Style,
    /// Today's column marker in the day header
    pub today: Style,
    pub bar_planning: Style,
    pub bar_active: Style,
    pub bar_completed: Style,
    /// Live create-selection highlight
    pub selection_preview: Style,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            muted: Style::default().fg(Color::Rgb(120, 120, 140)),
            success: Style::default().fg(Color::Rgb(120, 200, 120)),
            warning: Style::default().fg(Color::Rgb(230, 190, 100)),
            error: Style::default().fg(Color::Rgb(230, 110, 110)),
            info: Style::default().fg(Color::Rgb(110, 170, 230)),
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 70))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            header: Style::default()
                .fg(Color::Rgb(110, 170, 230))
                .add_modifier(Modifier::BOLD),
            grid: Style::default().fg(Color::Rgb(60, 60, 75)),
            today: Style::default()
                .fg(Color::Rgb(230, 190, 100))
                .add_modifier(Modifier::BOLD),
            bar_planning: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(140, 140, 170)),
            bar_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(110, 170, 230)),
            bar_completed: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(120, 200, 120)),
            selection_preview: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 160, 220)),
        }
    }
}

impl TuiTheme {
    /// Bar style for a project's status
    pub fn bar_style(&self, status: ProjectStatus) -> Style {
        match status {
            ProjectStatus::Planning => self.bar_planning,
            ProjectStatus::Active => self.bar_active,
            ProjectStatus::Completed => self.bar_completed,
        }
    }

    /// Foreground accent for a project's status (list view, dialogs)
    pub fn status_style(&self, status: ProjectStatus) -> Style {
        match status {
            ProjectStatus::Planning => self.muted,
            ProjectStatus::Active => self.info,
            ProjectStatus::Completed => self.success,
        }
    }
}
