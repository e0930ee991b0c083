use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::calendar::CalendarWindow;

use super::mapper::GridMetrics;

/// What the pointer went down on, as resolved by the host's hit test.
///
/// For item targets the host passes a snapshot of the item's current
/// dates; the engine never reaches back into the item collection, so a
/// host that deletes the item mid-drag costs nothing here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    /// The body of an existing item's bar.
    Body {
        id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// The left edge handle of a bar.
    StartEdge {
        id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// The right edge handle of a bar.
    EndEdge {
        id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Empty grid space, starting a create-selection.
    EmptyCell { date: NaiveDate, row: usize },
}

/// Live in-progress update pushed to the host during move/resize so the
/// UI reflects the drag. Not a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemChanged {
    pub id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Final event emitted on pointer release. This is what the host
/// persists; the engine never retries or blocks on its behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommit {
    /// A move or resize finished with a net change. The dates equal the
    /// last live update.
    ItemCommitted {
        id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Zero-movement press-release on an existing item.
    ItemActivated { id: Uuid },
    /// Create-selection released without moving off the anchor day.
    PointSelected { date: NaiveDate },
    /// Create-selection released over a range; `start <= end` always,
    /// regardless of drag direction.
    RangeSelected { start: NaiveDate, end: NaiveDate },
}

/// Snapshot captured at pointer-down for move/resize sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ItemSnapshot {
    id: Uuid,
    origin_x: f64,
    start: NaiveDate,
    end: NaiveDate,
    /// Last day delta that produced an update; deltas equal to this are
    /// sub-pixel jitter and emit nothing.
    last_delta: i64,
    /// Dates of the last update pushed to the host. Inside the clamp
    /// region different deltas resolve to the same dates; those emit
    /// nothing either.
    emitted: (NaiveDate, NaiveDate),
}

impl ItemSnapshot {
    fn new(id: Uuid, origin_x: f64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id,
            origin_x,
            start,
            end,
            last_delta: 0,
            emitted: (start, end),
        }
    }

    fn moved(&self, delta: i64) -> Option<(NaiveDate, NaiveDate)> {
        Some((shifted(self.start, delta)?, shifted(self.end, delta)?))
    }

    /// Shift only the start; crossing the end clamps to one day before
    /// it, so duration never drops below one day.
    fn start_resized(&self, delta: i64) -> Option<(NaiveDate, NaiveDate)> {
        let mut start = shifted(self.start, delta)?;
        let limit = self.end.checked_sub_days(Days::new(1))?;
        if start > limit {
            start = limit;
        }
        Some((start, self.end))
    }

    /// Mirror of `start_resized` for the end edge.
    fn end_resized(&self, delta: i64) -> Option<(NaiveDate, NaiveDate)> {
        let mut end = shifted(self.end, delta)?;
        let limit = self.start.checked_add_days(Days::new(1))?;
        if end < limit {
            end = limit;
        }
        Some((self.start, end))
    }
}

/// Shared pointer-move step for move/resize sessions: no update unless
/// both the whole-day delta and the resolved dates actually change.
fn advance_snapshot(
    snapshot: &mut ItemSnapshot,
    x: f64,
    metrics: &GridMetrics,
    resolve: fn(&ItemSnapshot, i64) -> Option<(NaiveDate, NaiveDate)>,
) -> Option<ItemChanged> {
    let delta = metrics.day_delta(snapshot.origin_x, x)?;
    if delta == snapshot.last_delta {
        return None;
    }
    let (start, end) = resolve(snapshot, delta)?;
    snapshot.last_delta = delta;
    if (start, end) == snapshot.emitted {
        return None;
    }
    snapshot.emitted = (start, end);
    Some(ItemChanged {
        id: snapshot.id,
        start,
        end,
    })
}

fn shifted(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

/// The single in-progress gesture. One variant per mode, so two modes
/// being active at once is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
enum DragSession {
    Move(ItemSnapshot),
    ResizeStart(ItemSnapshot),
    ResizeEnd(ItemSnapshot),
    CreateSelection {
        anchor: NaiveDate,
        live: NaiveDate,
        row: usize,
    },
}

/// Owns the one active drag session, if any.
///
/// Pointer events arrive serialized from the host's event loop; a
/// session is created on pointer-down, updated on pointer-move, and
/// destroyed unconditionally on pointer-up.
#[derive(Debug, Default)]
pub struct GestureEngine {
    session: Option<DragSession>,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Normalized `(start, end, row)` of an in-progress create
    /// selection, for rendering the preview. `None` in any other state.
    pub fn selection_preview(&self) -> Option<(NaiveDate, NaiveDate, usize)> {
        match self.session {
            Some(DragSession::CreateSelection { anchor, live, row }) => {
                Some((anchor.min(live), anchor.max(live), row))
            }
            _ => None,
        }
    }

    /// Start a session. A pointer-down while a session is active is
    /// ignored; the active session owns the interaction until its own
    /// pointer-up.
    pub fn pointer_down(&mut self, hit: HitTarget, x: f64) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(match hit {
            HitTarget::Body { id, start, end } => {
                DragSession::Move(ItemSnapshot::new(id, x, start, end))
            }
            HitTarget::StartEdge { id, start, end } => {
                DragSession::ResizeStart(ItemSnapshot::new(id, x, start, end))
            }
            HitTarget::EndEdge { id, start, end } => {
                DragSession::ResizeEnd(ItemSnapshot::new(id, x, start, end))
            }
            HitTarget::EmptyCell { date, row } => DragSession::CreateSelection {
                anchor: date,
                live: date,
                row,
            },
        });
    }

    /// Advance the session for a pointer-move.
    ///
    /// Move/resize emit a live update only when the whole-day delta
    /// actually changes; create-selection tracks the hovered day
    /// internally and emits nothing until release. Degenerate geometry
    /// (zero width, non-finite x) is a silent no-op.
    pub fn pointer_move(
        &mut self,
        x: f64,
        metrics: &GridMetrics,
        window: &CalendarWindow,
    ) -> Option<ItemChanged> {
        match self.session.as_mut()? {
            DragSession::Move(snapshot) => {
                advance_snapshot(snapshot, x, metrics, ItemSnapshot::moved)
            }
            DragSession::ResizeStart(snapshot) => {
                advance_snapshot(snapshot, x, metrics, ItemSnapshot::start_resized)
            }
            DragSession::ResizeEnd(snapshot) => {
                advance_snapshot(snapshot, x, metrics, ItemSnapshot::end_resized)
            }
            DragSession::CreateSelection { live, .. } => {
                // Direct recomputation of the hovered day, no delta
                // arithmetic.
                let index = metrics.day_index_at(x)?;
                if let Some(date) = window.date_for_index(index) {
                    *live = date;
                }
                None
            }
        }
    }

    /// Finish the session. The session is destroyed whether or not a
    /// drag distance threshold was met; a zero-movement press-release
    /// is a valid click.
    pub fn pointer_up(&mut self) -> Option<GestureCommit> {
        match self.session.take()? {
            DragSession::Move(snapshot) => {
                if snapshot.last_delta == 0 {
                    return Some(GestureCommit::ItemActivated { id: snapshot.id });
                }
                let (start, end) = snapshot.moved(snapshot.last_delta)?;
                Some(GestureCommit::ItemCommitted {
                    id: snapshot.id,
                    start,
                    end,
                })
            }
            DragSession::ResizeStart(snapshot) => {
                if snapshot.last_delta == 0 {
                    return Some(GestureCommit::ItemActivated { id: snapshot.id });
                }
                let (start, end) = snapshot.start_resized(snapshot.last_delta)?;
                Some(GestureCommit::ItemCommitted {
                    id: snapshot.id,
                    start,
                    end,
                })
            }
            DragSession::ResizeEnd(snapshot) => {
                if snapshot.last_delta == 0 {
                    return Some(GestureCommit::ItemActivated { id: snapshot.id });
                }
                let (start, end) = snapshot.end_resized(snapshot.last_delta)?;
                Some(GestureCommit::ItemCommitted {
                    id: snapshot.id,
                    start,
                    end,
                })
            }
            DragSession::CreateSelection { anchor, live, .. } => {
                if anchor == live {
                    Some(GestureCommit::PointSelected { date: anchor })
                } else {
                    Some(GestureCommit::RangeSelected {
                        start: anchor.min(live),
                        end: anchor.max(live),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn metrics() -> GridMetrics {
        // 10 cells per day across a 31-day month
        GridMetrics::new(310.0, 0.0, 31)
    }

    fn window() -> CalendarWindow {
        CalendarWindow::new(2025, 1).unwrap()
    }

    #[test]
    fn test_move_shifts_both_dates() {
        let mut engine = GestureEngine::new();
        let id = Uuid::new_v4();
        engine.pointer_down(
            HitTarget::Body {
                id,
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        let update = engine.pointer_move(130.0, &metrics(), &window()).unwrap();
        assert_eq!(update.id, id);
        assert_eq!(update.start, date(2025, 1, 13));
        assert_eq!(update.end, date(2025, 1, 15));

        let commit = engine.pointer_up().unwrap();
        assert_eq!(
            commit,
            GestureCommit::ItemCommitted {
                id,
                start: date(2025, 1, 13),
                end: date(2025, 1, 15),
            }
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn test_zero_delta_emits_nothing() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::Body {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        // Sub-pixel jitter within one day's width
        assert!(engine.pointer_move(101.0, &metrics(), &window()).is_none());
        assert!(engine.pointer_move(99.0, &metrics(), &window()).is_none());
        assert!(engine.pointer_move(104.0, &metrics(), &window()).is_none());
    }

    #[test]
    fn test_unchanged_delta_emits_once() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::Body {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        assert!(engine.pointer_move(110.0, &metrics(), &window()).is_some());
        // Same whole-day delta again
        assert!(engine.pointer_move(111.0, &metrics(), &window()).is_none());
        // Back to the origin day re-emits the original dates
        let update = engine.pointer_move(100.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 10));
    }

    #[test]
    fn test_resize_start_clamps_to_one_day_before_end() {
        let mut engine = GestureEngine::new();
        let id = Uuid::new_v4();
        engine.pointer_down(
            HitTarget::StartEdge {
                id,
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        // Drag the start edge far past the end
        let update = engine.pointer_move(250.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 11));
        assert_eq!(update.end, date(2025, 1, 12));
        assert!(update.start < update.end);
    }

    #[test]
    fn test_clamped_resize_emits_identical_dates_once() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::StartEdge {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        // First move into the clamp region emits the clamped dates
        let update = engine.pointer_move(250.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 11));

        // Deeper into the clamp region the delta changes but the
        // resolved dates do not; nothing is re-emitted
        assert!(engine.pointer_move(270.0, &metrics(), &window()).is_none());
        assert!(engine.pointer_move(290.0, &metrics(), &window()).is_none());

        // Leaving the clamp region emits again
        let update = engine.pointer_move(90.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 9));
        assert_eq!(update.end, date(2025, 1, 12));
    }

    #[test]
    fn test_resize_end_clamps_to_one_day_after_start() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::EndEdge {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 20),
            },
            200.0,
        );

        let update = engine.pointer_move(20.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 10));
        assert_eq!(update.end, date(2025, 1, 11));
    }

    #[test]
    fn test_resize_moves_freely_inside_range() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::StartEdge {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 20),
            },
            100.0,
        );

        let update = engine.pointer_move(130.0, &metrics(), &window()).unwrap();
        assert_eq!(update.start, date(2025, 1, 13));
        assert_eq!(update.end, date(2025, 1, 20));
    }

    #[test]
    fn test_create_click_commits_point() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::EmptyCell {
                date: date(2025, 1, 5),
                row: 3,
            },
            45.0,
        );

        let commit = engine.pointer_up().unwrap();
        assert_eq!(
            commit,
            GestureCommit::PointSelected {
                date: date(2025, 1, 5)
            }
        );
    }

    #[test]
    fn test_create_backwards_drag_normalizes() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::EmptyCell {
                date: date(2025, 1, 10),
                row: 0,
            },
            95.0,
        );

        // Drag left to day 3; moves emit nothing for create sessions
        assert!(engine.pointer_move(25.0, &metrics(), &window()).is_none());

        let commit = engine.pointer_up().unwrap();
        assert_eq!(
            commit,
            GestureCommit::RangeSelected {
                start: date(2025, 1, 3),
                end: date(2025, 1, 10),
            }
        );
    }

    #[test]
    fn test_selection_preview_is_normalized() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::EmptyCell {
                date: date(2025, 1, 10),
                row: 2,
            },
            95.0,
        );
        engine.pointer_move(25.0, &metrics(), &window());

        assert_eq!(
            engine.selection_preview(),
            Some((date(2025, 1, 3), date(2025, 1, 10), 2))
        );
    }

    #[test]
    fn test_click_on_item_activates() {
        let mut engine = GestureEngine::new();
        let id = Uuid::new_v4();
        engine.pointer_down(
            HitTarget::Body {
                id,
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        assert_eq!(
            engine.pointer_up(),
            Some(GestureCommit::ItemActivated { id })
        );
    }

    #[test]
    fn test_reentrant_pointer_down_ignored() {
        let mut engine = GestureEngine::new();
        let first = Uuid::new_v4();
        engine.pointer_down(
            HitTarget::Body {
                id: first,
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );
        engine.pointer_down(
            HitTarget::EmptyCell {
                date: date(2025, 1, 1),
                row: 0,
            },
            5.0,
        );

        // The original session still owns the interaction
        assert_eq!(
            engine.pointer_up(),
            Some(GestureCommit::ItemActivated { id: first })
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn test_degenerate_geometry_is_a_no_op() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(
            HitTarget::Body {
                id: Uuid::new_v4(),
                start: date(2025, 1, 10),
                end: date(2025, 1, 12),
            },
            100.0,
        );

        let zero_width = GridMetrics::new(0.0, 0.0, 31);
        assert!(engine
            .pointer_move(500.0, &zero_width, &window())
            .is_none());
        // Session survives and still resolves on pointer-up
        assert!(engine.pointer_up().is_some());
    }

    #[test]
    fn test_pointer_up_without_session_is_a_no_op() {
        let mut engine = GestureEngine::new();
        assert!(engine.pointer_up().is_none());
        assert!(engine
            .pointer_move(10.0, &metrics(), &window())
            .is_none());
    }
}
