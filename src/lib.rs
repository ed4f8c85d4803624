//! Placement and merge engine for a field of draggable color circles.
//!
//! The engine lives in `field` (geometry, colors, placement, merging, drag
//! tracking) and is driven through a `Session`. `wasm` exposes the session to
//! the page script, which only renders what it is told.

pub mod field;
pub mod output;
pub mod session;
mod wasm;

pub use field::{
    Circle, CircleId, Color, Field, FieldConfig, MergeEngine, MergeResult, MergedCircle,
    PlacementError, PlacementGenerator, PlacementRequest, Point, Rect,
};
pub use session::{ClickOutcome, DragOutcome, Session};
pub use wasm::{CircleField, init_logging};
