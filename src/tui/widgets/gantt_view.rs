use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use chrono::Datelike;

use crate::calendar::CalendarWindow;
use crate::engine::{layout_rows, span_in_window, GridMetrics};
use crate::tui::app::App;

/// Rows taken by the day-number header above the bars.
pub const HEADER_ROWS: u16 = 1;

/// Metrics snapshot for the bar area of the grid. The grid is not
/// horizontally scrollable in this host, so the scroll offset is zero.
pub fn grid_metrics(area: Rect, window: &CalendarWindow) -> GridMetrics {
    GridMetrics::new(area.width as f64, 0.0, window.days_in_month())
}

/// Rows that take part in the grid: one per placed bar plus the
/// configured trailing empty rows, bounded by the visible area. Rows
/// past this count are blank and accept no create drag.
pub(crate) fn active_row_count(
    bar_count: usize,
    trailing_empty_rows: usize,
    visible_rows: usize,
) -> usize {
    bar_count.saturating_add(trailing_empty_rows).min(visible_rows)
}

/// One row of the grid as a cell buffer. Bars and the selection
/// preview paint over the background; adjacent same-styled cells merge
/// into spans at the end.
struct RowPainter {
    cells: Vec<(char, Style)>,
}

impl RowPainter {
    fn new(width: u16, fill: char, style: Style) -> Self {
        Self {
            cells: vec![(fill, style); width as usize],
        }
    }

    fn set(&mut self, x: u16, ch: char, style: Style) {
        if let Some(cell) = self.cells.get_mut(x as usize) {
            *cell = (ch, style);
        }
    }

    /// Paint `text` starting at `left`, truncated at the row end.
    fn paint(&mut self, left: u16, text: &str, style: Style) {
        for (offset, ch) in text.chars().enumerate() {
            let x = left as usize + offset;
            if x >= self.cells.len() {
                break;
            }
            self.cells[x] = (ch, style);
        }
    }

    fn into_line(self) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for (ch, style) in self.cells {
            match run_style {
                Some(current) if current == style => run.push(ch),
                Some(current) => {
                    spans.push(Span::styled(std::mem::take(&mut run), current));
                    run.push(ch);
                    run_style = Some(style);
                }
                None => {
                    run.push(ch);
                    run_style = Some(style);
                }
            }
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }
        Line::from(spans)
    }
}

pub fn render_gantt_view(frame: &mut Frame, app: &App, area: Rect) {
    if area.width == 0 || area.height <= HEADER_ROWS {
        return;
    }

    let window = app.window;
    let days = window.days_in_month();
    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);

    lines.push(day_header_line(app, area.width));

    let bars = layout_rows(&app.projects, &window);
    let preview = app.engine.selection_preview();
    let grid_rows = (area.height - HEADER_ROWS) as usize;
    let active_rows = active_row_count(bars.len(), app.config.trailing_empty_rows, grid_rows);
    let selected = app.selected_id();

    for row in 0..grid_rows {
        let mut painter = RowPainter::new(area.width, ' ', app.theme.grid);

        if row >= active_rows {
            lines.push(painter.into_line());
            continue;
        }

        // Faint dot at each day boundary
        for day in 0..days {
            let x = (day as f64 / days as f64 * area.width as f64).floor() as u16;
            painter.set(x, '·', app.theme.grid);
        }

        if let Some(bar) = bars.iter().find(|b| b.row == row) {
            if let Some(project) = app.projects.iter().find(|p| p.id == bar.id) {
                let (left, width) = bar.geometry.to_cells(area.width);
                let mut style = app.theme.bar_style(project.status);
                if selected == Some(project.id) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }

                let mut label = String::with_capacity(width as usize);
                label.push(if bar.geometry.clipped_left {
                    '◀'
                } else {
                    ' '
                });
                label.push_str(project.status.icon());
                label.push(' ');
                label.push_str(&project.title);
                let mut content: String = label.chars().take(width as usize).collect();
                while content.chars().count() < width as usize {
                    content.push(' ');
                }
                if bar.geometry.clipped_right && width >= 1 {
                    content = content
                        .chars()
                        .take(width as usize - 1)
                        .chain(std::iter::once('▶'))
                        .collect();
                }
                painter.paint(left, &content, style);
            }
        }

        // Live create-selection highlight paints over everything else
        // on its row
        if let Some((start, end, preview_row)) = preview {
            if preview_row == row {
                if let Some(geometry) = span_in_window(start, end, &window) {
                    let (left, width) = geometry.to_cells(area.width);
                    let fill: String = std::iter::repeat('▒').take(width as usize).collect();
                    painter.paint(left, &fill, app.theme.selection_preview);
                }
            }
        }

        lines.push(painter.into_line());
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Day numbers across the top, aligned with each day's column.
fn day_header_line(app: &App, width: u16) -> Line<'static> {
    let window = app.window;
    let days = window.days_in_month();
    let today = chrono::Local::now().date_naive();
    let today_day = (today.year() == window.year() && today.month() == window.month())
        .then(|| today.day());

    let mut painter = RowPainter::new(width, ' ', app.theme.muted);
    let mut last_end: i32 = -1;

    for day in 1..=days {
        let x = ((day - 1) as f64 / days as f64 * width as f64).floor() as u16;
        let label = day.to_string();
        // Skip labels that would collide on narrow terminals
        if (x as i32) <= last_end {
            continue;
        }
        let style = if today_day == Some(day) {
            app.theme.today
        } else {
            app.theme.muted
        };
        painter.paint(x, &label, style);
        last_end = x as i32 + label.len() as i32;
    }

    painter.into_line()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_row_count_honors_trailing_rows() {
        assert_eq!(active_row_count(2, 3, 20), 5);
        assert_eq!(active_row_count(0, 3, 20), 3);
        // Bounded by the visible area
        assert_eq!(active_row_count(10, 3, 8), 8);
        assert_eq!(active_row_count(0, 0, 8), 0);
    }
}
