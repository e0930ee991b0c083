//! The direct-manipulation timeline engine: pure coordinate mapping,
//! the gesture state machine, and bar placement. Host-agnostic; the
//! TUI layer feeds it pointer events and applies what it emits.

pub mod gesture;
pub mod mapper;
pub mod placement;

pub use gesture::{GestureCommit, GestureEngine, HitTarget, ItemChanged};
pub use mapper::GridMetrics;
pub use placement::{layout_rows, span_in_window, BarGeometry, PlacedBar};
