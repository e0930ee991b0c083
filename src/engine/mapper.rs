/// Geometry snapshot of the scrollable day grid at one instant.
///
/// Captured fresh for every pointer event; holds no state between
/// events. All mapping is pure arithmetic over this snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Total scrollable content width in pixels (terminal cells here).
    pub total_width: f64,
    /// Horizontal scroll offset already applied to the row.
    pub scroll_offset: f64,
    /// Day count of the displayed month.
    pub days_in_month: u32,
}

impl GridMetrics {
    pub fn new(total_width: f64, scroll_offset: f64, days_in_month: u32) -> Self {
        Self {
            total_width,
            scroll_offset,
            days_in_month,
        }
    }

    /// A zero-width or non-finite snapshot maps nothing. Guards every
    /// conversion so NaN/Infinity can never reach a date computation.
    fn is_usable(&self) -> bool {
        self.total_width.is_finite()
            && self.total_width > 0.0
            && self.scroll_offset.is_finite()
            && self.days_in_month > 0
    }

    /// Width of one day column.
    pub fn pixels_per_day(&self) -> Option<f64> {
        if !self.is_usable() {
            return None;
        }
        Some(self.total_width / self.days_in_month as f64)
    }

    /// Zero-based day index under the pointer, clamped to the month.
    ///
    /// Monotonic in `x`: moving right never decreases the index for a
    /// fixed snapshot.
    pub fn day_index_at(&self, x: f64) -> Option<u32> {
        if !self.is_usable() || !x.is_finite() {
            return None;
        }
        let adjusted = x + self.scroll_offset;
        let raw = (adjusted / self.total_width) * self.days_in_month as f64;
        let clamped = (raw.floor() as i64).clamp(0, self.days_in_month as i64 - 1);
        Some(clamped as u32)
    }

    /// Whole-day delta between the origin pointer position and `x`.
    pub fn day_delta(&self, origin_x: f64, x: f64) -> Option<i64> {
        if !origin_x.is_finite() || !x.is_finite() {
            return None;
        }
        let per_day = self.pixels_per_day()?;
        Some(((x - origin_x) / per_day).round() as i64)
    }
}
