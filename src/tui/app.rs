use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use ratatui::layout::Rect;
use uuid::Uuid;

use crate::calendar::{format_day, CalendarWindow};
use crate::config::Config;
use crate::engine::{layout_rows, GestureCommit, GestureEngine, ItemChanged};
use crate::error::Result;
use crate::models::{Project, ProjectStatus};
use crate::storage::Storage;

use super::theme::TuiTheme;
use super::ui;
use super::widgets::gantt_view::HEADER_ROWS;

/// Main application state
pub struct App {
    /// Project list, the host-owned data the engine manipulates
    pub projects: Vec<Project>,
    /// Currently displayed month
    pub window: CalendarWindow,
    /// User-chosen view mode; `effective_view` may force List on
    /// narrow terminals
    pub view: ViewMode,
    /// The one active drag session lives here
    pub engine: GestureEngine,
    /// Persistence for commit callbacks
    pub storage: Storage,
    /// Selected item index within the visible, start-sorted list
    pub selected_index: usize,
    /// Active popup/dialog state
    pub popup: Option<PopupState>,
    /// Status message (success/error feedback)
    pub status_message: Option<StatusMessage>,
    /// False disables all drag interactions
    pub editable: bool,
    /// Application running flag
    pub running: bool,
    /// Theme colors for rendering
    pub theme: TuiTheme,
    /// Configuration
    pub config: Config,
    /// Last known terminal size, for view breakpoint and hit testing
    pub terminal_size: (u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Gantt,
    List,
}

#[derive(Debug, Clone)]
pub enum PopupState {
    Help,
    CreateProject {
        start: NaiveDate,
        end: NaiveDate,
        input: String,
        cursor: usize,
    },
    EditProject {
        id: Uuid,
        input: String,
        cursor: usize,
    },
    ConfirmDelete {
        id: Uuid,
    },
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl App {
    pub fn new(
        data_dir: Option<&Path>,
        window: Option<CalendarWindow>,
        read_only: bool,
    ) -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let storage = match data_dir {
            Some(dir) => Storage::new(dir)?,
            None => Storage::new(&config.get_data_directory().join(".monthline"))?,
        };
        let projects = storage.load()?;

        Ok(Self {
            projects,
            window: window.unwrap_or_else(CalendarWindow::current),
            view: ViewMode::Gantt,
            engine: GestureEngine::new(),
            storage,
            selected_index: 0,
            popup: None,
            status_message: None,
            editable: !read_only,
            running: true,
            theme: TuiTheme::default(),
            config,
            terminal_size: (0, 0),
        })
    }

    /// View mode actually rendered: narrow terminals fall back to the
    /// list, which needs no horizontal room for day columns.
    pub fn effective_view(&self) -> ViewMode {
        if self.terminal_size.0 < self.config.list_mode_breakpoint {
            ViewMode::List
        } else {
            self.view
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Gantt => ViewMode::List,
            ViewMode::List => ViewMode::Gantt,
        };
    }

    /// Projects intersecting the current window, sorted by start date.
    /// Both views and keyboard selection share this ordering.
    pub fn visible_projects(&self) -> Vec<&Project> {
        let first = self.window.first_day();
        let last = self.window.last_day();
        let mut visible: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.end_date >= first && p.start_date <= last)
            .collect();
        visible.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        visible
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.visible_projects().get(self.selected_index).map(|p| p.id)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible_projects().get(self.selected_index).copied()
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.visible_projects().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_projects().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Replace the window with the next month
    pub fn next_month(&mut self) {
        self.window = self.window.next();
        self.selected_index = 0;
    }

    /// Replace the window with the previous month
    pub fn prev_month(&mut self) {
        self.window = self.window.prev();
        self.selected_index = 0;
    }

    /// Live update from an in-progress move/resize. A stale id (item
    /// deleted mid-drag) is a no-op.
    pub fn apply_item_changed(&mut self, update: ItemChanged) {
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == update.id) {
            project.start_date = update.start;
            project.end_date = update.end;
        }
    }

    /// Final event from a released gesture.
    pub fn apply_commit(&mut self, commit: GestureCommit) {
        match commit {
            GestureCommit::ItemCommitted { id, start, end } => {
                self.apply_item_changed(ItemChanged { id, start, end });
                let summary = format!("{} – {}", format_day(start), format_day(end));
                self.save_projects(&format!("Saved: {}", summary));
            }
            GestureCommit::ItemActivated { id } => {
                if let Some(project) = self.projects.iter().find(|p| p.id == id) {
                    let input = project.title.clone();
                    let cursor = input.chars().count();
                    self.popup = Some(PopupState::EditProject { id, input, cursor });
                }
            }
            GestureCommit::PointSelected { date } => {
                self.popup = Some(PopupState::CreateProject {
                    start: date,
                    end: date,
                    input: String::new(),
                    cursor: 0,
                });
            }
            GestureCommit::RangeSelected { start, end } => {
                self.popup = Some(PopupState::CreateProject {
                    start,
                    end,
                    input: String::new(),
                    cursor: 0,
                });
            }
        }
    }

    /// Create a project from a committed selection and dialog input.
    pub fn create_project(&mut self, title: String, start: NaiveDate, end: NaiveDate) {
        let title = if title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            title.trim().to_string()
        };
        self.projects.push(Project::new(title.clone(), start, end));
        self.save_projects(&format!("Created \"{}\"", title));
    }

    pub fn rename_project(&mut self, id: Uuid, title: String) {
        let title = title.trim();
        if title.is_empty() {
            self.set_status("Title cannot be empty".to_string(), StatusKind::Error);
            return;
        }
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
            project.title = title.to_string();
            self.save_projects("Renamed project");
        }
    }

    pub fn delete_project(&mut self, id: Uuid) {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() < before {
            self.save_projects("Deleted project");
        }
        self.clamp_selection();
    }

    /// Cycle the selected project's status (list navigation affordance)
    pub fn cycle_selected_status(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let mut label = None;
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
            project.status = project.status.cycled();
            label = Some(project.status.label());
        }
        if let Some(label) = label {
            self.save_projects(&format!("Status: {}", label));
        }
    }

    /// Persist and report. Save failures surface on the status line;
    /// the gesture that triggered the save has already completed.
    fn save_projects(&mut self, success: &str) {
        match self.storage.save(&self.projects) {
            Ok(()) => self.set_status(success.to_string(), StatusKind::Success),
            Err(e) => self.set_status(format!("Save failed: {}", e), StatusKind::Error),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Tick - called periodically for time-based updates
    pub fn tick(&mut self) {
        if let Some(ref msg) = self.status_message {
            if Instant::now() >= msg.expires_at {
                self.status_message = None;
            }
        }
    }

    /// Count of projects per status in the current window, for the
    /// status line overview.
    pub fn window_stats(&self) -> (usize, usize, usize) {
        let mut planning = 0;
        let mut active = 0;
        let mut completed = 0;
        for project in self.visible_projects() {
            match project.status {
                ProjectStatus::Planning => planning += 1,
                ProjectStatus::Active => active += 1,
                ProjectStatus::Completed => completed += 1,
            }
        }
        (planning, active, completed)
    }

    /// Bars stacked past the bottom of the grid area. The grid has no
    /// vertical scroll, so these rows cannot be seen or dragged; the
    /// status bar points at the list view when this is non-zero.
    pub fn hidden_bar_count(&self) -> usize {
        let (width, height) = self.terminal_size;
        let inner = ui::content_inner(Rect::new(0, 0, width, height));
        let visible_rows = inner.height.saturating_sub(HEADER_ROWS) as usize;
        layout_rows(&self.projects, &self.window)
            .len()
            .saturating_sub(visible_rows)
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(name: &str) -> (App, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "monthline-test-{}-{}",
            name,
            std::process::id()
        ));
        let window = CalendarWindow::new(2025, 1).unwrap();
        let mut app = App::new(Some(&dir), Some(window), false).unwrap();
        app.config = Config::default();
        (app, dir)
    }

    #[test]
    fn test_narrow_terminal_forces_list_view() {
        let (mut app, dir) = test_app("breakpoint");
        assert_eq!(app.config.list_mode_breakpoint, 70);

        app.view = ViewMode::Gantt;
        app.terminal_size = (69, 30);
        assert_eq!(app.effective_view(), ViewMode::List);

        app.terminal_size = (70, 30);
        assert_eq!(app.effective_view(), ViewMode::Gantt);

        // An explicit List choice holds on wide terminals too
        app.view = ViewMode::List;
        app.terminal_size = (120, 30);
        assert_eq!(app.effective_view(), ViewMode::List);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_hidden_bar_count_tracks_terminal_height() {
        let (mut app, dir) = test_app("hidden-bars");
        for day in 1..=6 {
            let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
            app.projects
                .push(Project::new(format!("p{}", day), date, date));
        }

        // 8 rows leave 2 bar rows after chrome and the day header
        app.terminal_size = (100, 8);
        assert_eq!(app.hidden_bar_count(), 4);

        app.terminal_size = (100, 40);
        assert_eq!(app.hidden_bar_count(), 0);

        std::fs::remove_dir_all(&dir).ok();
    }
}
