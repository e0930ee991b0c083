use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::engine::{layout_rows, HitTarget};
use crate::error::Result;

use super::app::{App, PopupState, ViewMode};
use super::input_handler::{handle_text_input, InputResult};
use super::ui;
use super::widgets::gantt_view::{active_row_count, grid_metrics, HEADER_ROWS};

/// Handle a key event, routing to the active popup first.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.popup.is_some() {
        handle_popup_key(app, key);
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.popup = Some(PopupState::Help),
        KeyCode::Char('v') => app.toggle_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_month(),
        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter if app.editable => {
            if let Some(project) = app.selected_project() {
                let id = project.id;
                let input = project.title.clone();
                let cursor = input.chars().count();
                app.popup = Some(PopupState::EditProject { id, input, cursor });
            }
        }
        KeyCode::Char('n') if app.editable => {
            let day = app.window.first_day();
            app.popup = Some(PopupState::CreateProject {
                start: day,
                end: day,
                input: String::new(),
                cursor: 0,
            });
        }
        KeyCode::Char('s') if app.editable => app.cycle_selected_status(),
        KeyCode::Char('d') if app.editable => {
            if let Some(id) = app.selected_id() {
                app.popup = Some(PopupState::ConfirmDelete { id });
            }
        }
        _ => {}
    }

    Ok(())
}

fn handle_popup_key(app: &mut App, key: KeyEvent) {
    let Some(popup) = app.popup.take() else {
        return;
    };

    match popup {
        PopupState::Help => {
            // Any key closes
        }
        PopupState::CreateProject {
            start,
            end,
            input,
            cursor,
        } => match handle_text_input(key, &input, cursor) {
            InputResult::Submit => app.create_project(input, start, end),
            InputResult::Cancel => {}
            InputResult::Changed { input, cursor } => {
                app.popup = Some(PopupState::CreateProject {
                    start,
                    end,
                    input,
                    cursor,
                });
            }
            InputResult::Ignored => {
                app.popup = Some(PopupState::CreateProject {
                    start,
                    end,
                    input,
                    cursor,
                });
            }
        },
        PopupState::EditProject { id, input, cursor } => {
            match handle_text_input(key, &input, cursor) {
                InputResult::Submit => app.rename_project(id, input),
                InputResult::Cancel => {}
                InputResult::Changed { input, cursor } => {
                    app.popup = Some(PopupState::EditProject { id, input, cursor });
                }
                InputResult::Ignored => {
                    app.popup = Some(PopupState::EditProject { id, input, cursor });
                }
            }
        }
        PopupState::ConfirmDelete { id } => match key.code {
            KeyCode::Enter => app.delete_project(id),
            KeyCode::Esc => {}
            _ => app.popup = Some(PopupState::ConfirmDelete { id }),
        },
    }
}

/// Translate raw mouse events into gesture engine calls.
///
/// Down events hit-test against the same placement the renderer used;
/// drag and release events are delivered to the engine regardless of
/// position, so a pointer that leaves the grid still resolves its
/// session on release.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if !app.editable || app.popup.is_some() {
        return Ok(());
    }
    if app.effective_view() != ViewMode::Gantt {
        return Ok(());
    }

    let (width, height) = app.terminal_size;
    let inner = ui::content_inner(Rect::new(0, 0, width, height));
    if inner.width == 0 {
        return Ok(());
    }
    let metrics = grid_metrics(inner, &app.window);
    let rel_x = mouse.column as f64 - inner.x as f64;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(hit) = hit_test(app, inner, mouse.column, mouse.row) else {
                return Ok(());
            };
            app.engine.pointer_down(hit, rel_x);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let window = app.window;
            if let Some(update) = app.engine.pointer_move(rel_x, &metrics, &window) {
                app.apply_item_changed(update);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(commit) = app.engine.pointer_up() {
                app.apply_commit(commit);
            }
        }
        _ => {}
    }

    Ok(())
}

/// Resolve what sits under a pointer-down: a bar's body, one of its
/// edge handles, or empty grid space.
fn hit_test(app: &App, inner: Rect, column: u16, row: u16) -> Option<HitTarget> {
    let bar_top = inner.y + HEADER_ROWS;
    if column < inner.x
        || column >= inner.x + inner.width
        || row < bar_top
        || row >= inner.y + inner.height
    {
        return None;
    }

    let grid_row = (row - bar_top) as usize;
    let rel_x = column - inner.x;
    let bars = layout_rows(&app.projects, &app.window);

    if let Some(bar) = bars.iter().find(|b| b.row == grid_row) {
        let (left, width) = bar.geometry.to_cells(inner.width);
        if rel_x >= left && rel_x < left + width {
            let project = app.projects.iter().find(|p| p.id == bar.id)?;
            let (id, start, end) = (project.id, project.start_date, project.end_date);
            // Single- and two-cell bars have no room for edge handles
            let hit = if width >= 3 && rel_x == left {
                HitTarget::StartEdge { id, start, end }
            } else if width >= 3 && rel_x == left + width - 1 {
                HitTarget::EndEdge { id, start, end }
            } else {
                HitTarget::Body { id, start, end }
            };
            return Some(hit);
        }
    }

    // Blank rows below the trailing empty rows accept no create drag
    let visible_rows = (inner.height - HEADER_ROWS) as usize;
    let active = active_row_count(bars.len(), app.config.trailing_empty_rows, visible_rows);
    if grid_row >= active {
        return None;
    }

    let metrics = grid_metrics(inner, &app.window);
    let day = metrics.day_index_at(rel_x as f64)?;
    let date = app.window.date_for_index(day)?;
    Some(HitTarget::EmptyCell {
        date,
        row: grid_row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::calendar::CalendarWindow;
    use crate::config::Config;
    use crate::models::Project;

    fn test_app(name: &str) -> (App, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "monthline-test-{}-{}",
            name,
            std::process::id()
        ));
        let window = CalendarWindow::new(2025, 1).unwrap();
        let mut app = App::new(Some(&dir), Some(window), false).unwrap();
        app.config = Config::default();
        app.terminal_size = (80, 24);
        (app, dir)
    }

    #[test]
    fn test_create_rows_end_at_trailing_empty_rows() {
        let (mut app, dir) = test_app("create-rows");
        app.config.trailing_empty_rows = 2;

        let inner = ui::content_inner(Rect::new(0, 0, 80, 24));
        let bar_top = inner.y + HEADER_ROWS;

        // With no bars, exactly the trailing empty rows accept a drag
        assert!(matches!(
            hit_test(&app, inner, 10, bar_top),
            Some(HitTarget::EmptyCell { .. })
        ));
        assert!(matches!(
            hit_test(&app, inner, 10, bar_top + 1),
            Some(HitTarget::EmptyCell { .. })
        ));
        assert!(hit_test(&app, inner, 10, bar_top + 2).is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_hit_test_resolves_edges_and_body() {
        let (mut app, dir) = test_app("hit-bar");
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        app.projects
            .push(Project::new("wide".to_string(), start, end));

        let inner = ui::content_inner(Rect::new(0, 0, 80, 24));
        let bar_top = inner.y + HEADER_ROWS;

        assert!(matches!(
            hit_test(&app, inner, inner.x, bar_top),
            Some(HitTarget::StartEdge { .. })
        ));
        assert!(matches!(
            hit_test(&app, inner, inner.x + inner.width - 1, bar_top),
            Some(HitTarget::EndEdge { .. })
        ));
        assert!(matches!(
            hit_test(&app, inner, inner.x + 40, bar_top),
            Some(HitTarget::Body { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
