//! Edge-anchored sliding panel ("charm").
//!
//! A [`Charm`] is dragged out from the left or right screen edge with
//! rubber-band resistance, settles open or closed with a short ease-out
//! transition, and drives a dimming opacity and a depth scale on the
//! content behind it. At most one charm owns the active gesture at a time
//! (see [`exclusivity`]).

mod charm;
mod config;
mod effects;
mod error;
pub mod exclusivity;
mod gesture;
mod host;
mod model;
mod placement;
mod rubber_band;
mod transition;

pub use charm::Charm;
pub use config::CharmConfig;
pub use effects::{DepthConverter, DerivedEffects, OffsetConverter, OpacityConverter};
pub use error::CharmError;
pub use exclusivity::CharmId;
pub use gesture::{DragSession, GestureContext, GestureState, GestureTracker, ReleaseOutcome};
pub use host::{CharmHost, HostChrome, ParentContent, PointerCapture, SystemInsets, Visibility};
pub use model::{PanelGeometry, SurfaceLayout, TransformModel};
pub use placement::EdgePlacement;
pub use rubber_band::RubberBand;
pub use transition::{TransitionController, TransitionRequest};

pub mod prelude {
    pub use crate::{
        Charm, CharmConfig, CharmError, CharmHost, EdgePlacement, HostChrome, ParentContent,
        PointerCapture, SystemInsets, Visibility,
    };
}

#[cfg(test)]
#[path = "tests/rubber_band_tests.rs"]
mod rubber_band_tests;

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod effects_tests;

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod model_tests;

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod gesture_tests;
