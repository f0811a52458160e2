//! Pointer input primitives consumed by the charm gesture engine.

mod types;

pub use types::{PointerEvent, PointerEventKind, PointerId};
