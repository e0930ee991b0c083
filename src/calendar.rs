use chrono::{Datelike, Days, NaiveDate};

/// Number of days in a Gregorian month, leap years included.
///
/// Computed from chrono date arithmetic (first of next month minus first
/// of this month) rather than a hand-rolled table. Returns 0 for an
/// invalid month; callers validate months before reaching this.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(first_of_next_month);
    match (first, next) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 0,
    }
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

/// Calendar date for a 1-based day of the given month, if it exists.
pub fn date_for_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as `YYYY-MM-DD` from its own calendar fields.
///
/// `NaiveDate` carries no timezone, so this can never shift a day the
/// way a UTC round-trip on a local timestamp can. Every date string
/// that crosses the host boundary goes through here.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The currently displayed month. Pagination replaces the window
/// wholesale; a window is never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    year: i32,
    month: u32,
}

impl CalendarWindow {
    /// A window for the given year/month. `None` if the month is not 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The window containing today's local date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date"))
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_days(Days::new(self.days_in_month().saturating_sub(1) as u64))
            .unwrap_or(first)
    }

    /// Date for a zero-based day index within this month.
    pub fn date_for_index(&self, index: u32) -> Option<NaiveDate> {
        if index >= self.days_in_month() {
            return None;
        }
        date_for_day(self.year, self.month, index + 1)
    }

    /// The next month's window.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The previous month's window.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Display title, e.g. "January 2025".
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_gregorian() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_days_in_month_leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_format_day_is_iso_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(format_day(date), "2025-01-31");

        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_day(date), "2025-03-05");
    }

    #[test]
    fn test_window_bounds() {
        let window = CalendarWindow::new(2025, 1).unwrap();
        assert_eq!(window.first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(window.last_day(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(window.days_in_month(), 31);
    }

    #[test]
    fn test_window_pagination_wraps_year() {
        let december = CalendarWindow::new(2024, 12).unwrap();
        assert_eq!(december.next(), CalendarWindow::new(2025, 1).unwrap());

        let january = CalendarWindow::new(2025, 1).unwrap();
        assert_eq!(january.prev(), CalendarWindow::new(2024, 12).unwrap());
    }

    #[test]
    fn test_window_rejects_invalid_month() {
        assert!(CalendarWindow::new(2025, 0).is_none());
        assert!(CalendarWindow::new(2025, 13).is_none());
    }

    #[test]
    fn test_date_for_index() {
        let window = CalendarWindow::new(2025, 2).unwrap();
        assert_eq!(
            window.date_for_index(0),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            window.date_for_index(27),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(window.date_for_index(28), None);
    }
}
