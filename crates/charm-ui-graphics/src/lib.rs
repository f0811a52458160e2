//! Pure math/data for charm panel geometry
//!
//! This crate contains the geometry primitives and the layer transform
//! shared by the gesture engine and its hosts.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, GraphicsLayer, HorizontalAlignment, Point, Size};
}
