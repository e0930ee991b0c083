use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::calendar::CalendarWindow;
use crate::models::Project;

/// Horizontal span of one bar within the month row, as percentages of
/// the row width. This is the single source of layout math; every
/// render path converts through `to_cells` rather than redoing the
/// percent arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub visible_start: NaiveDate,
    pub visible_end: NaiveDate,
    pub left_percent: f64,
    pub width_percent: f64,
    /// The range continues before the month start.
    pub clipped_left: bool,
    /// The range continues past the month end.
    pub clipped_right: bool,
}

impl BarGeometry {
    /// Convert to `(left, width)` in terminal cells for a row of the
    /// given width. Width is at least one cell and never overflows the
    /// row.
    pub fn to_cells(&self, area_width: u16) -> (u16, u16) {
        if area_width == 0 {
            return (0, 0);
        }
        let row = area_width as f64;
        let left = ((self.left_percent / 100.0 * row).floor() as u16).min(area_width - 1);
        let width = (self.width_percent / 100.0 * row).round() as u16;
        let width = width.clamp(1, area_width - left);
        (left, width)
    }
}

/// Visible span of a date range within a month window.
///
/// Ranges entirely before or after the window are filtered out
/// (`None`); everything else clips to the month boundaries.
pub fn span_in_window(
    start: NaiveDate,
    end: NaiveDate,
    window: &CalendarWindow,
) -> Option<BarGeometry> {
    let first = window.first_day();
    let last = window.last_day();
    if end < first || start > last {
        return None;
    }

    let visible_start = start.max(first);
    let visible_end = end.min(last);
    let days = window.days_in_month() as f64;

    Some(BarGeometry {
        visible_start,
        visible_end,
        left_percent: (visible_start.day() - 1) as f64 / days * 100.0,
        width_percent: (visible_end.day() - visible_start.day() + 1) as f64 / days * 100.0,
        clipped_left: start < first,
        clipped_right: end > last,
    })
}

/// A project bar placed on its own grid row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBar {
    pub id: Uuid,
    pub row: usize,
    pub geometry: BarGeometry,
}

/// Place every project visible in the window on sequential rows,
/// ordered by start date. Concurrent projects stack in start order;
/// there is no overlap packing.
pub fn layout_rows(projects: &[Project], window: &CalendarWindow) -> Vec<PlacedBar> {
    let mut visible: Vec<(&Project, BarGeometry)> = projects
        .iter()
        .filter_map(|p| span_in_window(p.start_date, p.end_date, window).map(|g| (p, g)))
        .collect();

    visible.sort_by(|a, b| {
        a.0.start_date
            .cmp(&b.0.start_date)
            .then_with(|| a.0.id.cmp(&b.0.id))
    });

    visible
        .into_iter()
        .enumerate()
        .map(|(row, (project, geometry))| PlacedBar {
            id: project.id,
            row,
            geometry,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> CalendarWindow {
        CalendarWindow::new(2025, 1).unwrap()
    }

    #[test]
    fn test_span_inside_month() {
        let geometry = span_in_window(date(2025, 1, 5), date(2025, 1, 9), &january()).unwrap();
        assert_eq!(geometry.visible_start, date(2025, 1, 5));
        assert_eq!(geometry.visible_end, date(2025, 1, 9));
        assert!((geometry.left_percent - 4.0 / 31.0 * 100.0).abs() < 1e-9);
        assert!((geometry.width_percent - 5.0 / 31.0 * 100.0).abs() < 1e-9);
        assert!(!geometry.clipped_left);
        assert!(!geometry.clipped_right);
    }

    #[test]
    fn test_span_clips_at_month_end() {
        // Spans into February; January shows the last four days only
        let geometry = span_in_window(date(2025, 1, 28), date(2025, 2, 3), &january()).unwrap();
        assert_eq!(geometry.visible_start, date(2025, 1, 28));
        assert_eq!(geometry.visible_end, date(2025, 1, 31));
        assert!((geometry.width_percent - 4.0 / 31.0 * 100.0).abs() < 1e-9);
        assert!(!geometry.clipped_left);
        assert!(geometry.clipped_right);
    }

    #[test]
    fn test_span_clips_at_month_start() {
        let geometry = span_in_window(date(2024, 12, 20), date(2025, 1, 2), &january()).unwrap();
        assert_eq!(geometry.visible_start, date(2025, 1, 1));
        assert_eq!(geometry.visible_end, date(2025, 1, 2));
        assert!((geometry.left_percent - 0.0).abs() < 1e-9);
        assert!(geometry.clipped_left);
        assert!(!geometry.clipped_right);
    }

    #[test]
    fn test_ranges_outside_window_are_filtered() {
        assert!(span_in_window(date(2024, 12, 1), date(2024, 12, 31), &january()).is_none());
        assert!(span_in_window(date(2025, 2, 1), date(2025, 2, 10), &january()).is_none());
        // Touching the boundary is visible
        assert!(span_in_window(date(2024, 12, 20), date(2025, 1, 1), &january()).is_some());
        assert!(span_in_window(date(2025, 1, 31), date(2025, 2, 10), &january()).is_some());
    }

    #[test]
    fn test_to_cells_stays_inside_row() {
        let geometry = span_in_window(date(2025, 1, 28), date(2025, 1, 31), &january()).unwrap();
        let (left, width) = geometry.to_cells(80);
        assert!(left < 80);
        assert!(width >= 1);
        assert!(left + width <= 80);

        // Single day bar never collapses to zero width
        let single = span_in_window(date(2025, 1, 1), date(2025, 1, 1), &january()).unwrap();
        let (left, width) = single.to_cells(20);
        assert_eq!(left, 0);
        assert!(width >= 1);
    }

    #[test]
    fn test_layout_rows_sorted_by_start() {
        let projects = vec![
            Project::new("B".to_string(), date(2025, 1, 15), date(2025, 1, 20)),
            Project::new("A".to_string(), date(2025, 1, 2), date(2025, 1, 8)),
            Project::new("C".to_string(), date(2024, 11, 1), date(2024, 11, 30)),
        ];

        let placed = layout_rows(&projects, &january());
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].row, 0);
        assert_eq!(placed[0].id, projects[1].id);
        assert_eq!(placed[1].row, 1);
        assert_eq!(placed[1].id, projects[0].id);
    }

    #[test]
    fn test_overlapping_projects_stack_in_start_order() {
        let projects = vec![
            Project::new("First".to_string(), date(2025, 1, 5), date(2025, 1, 20)),
            Project::new("Second".to_string(), date(2025, 1, 10), date(2025, 1, 15)),
        ];

        let placed = layout_rows(&projects, &january());
        assert_eq!(placed[0].id, projects[0].id);
        assert_eq!(placed[1].id, projects[1].id);
    }
}
