//! Press, drag and release protocol of a charm.
//!
//! ```text
//! Idle -> PressedCapturing -> Dragging -> ReleasingOpen | ReleasingClosed -> Idle
//! ```
//!
//! The releasing states last until the settle transition completes and its
//! settle callback runs. A tap (release exactly where the press landed) on a
//! panel resting closed goes straight back to `Idle`. A tap anywhere else,
//! including mid-transition, settles like any other release.

use std::cell::Cell;
use std::rc::Rc;

use charm_foundation::PointerId;
use charm_ui_graphics::Point;

use crate::exclusivity::{self, CharmId};
use crate::host::{CharmHost, Visibility};
use crate::model::TransformModel;
use crate::rubber_band::RubberBand;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    PressedCapturing,
    Dragging,
    ReleasingOpen,
    ReleasingClosed,
}

impl GestureState {
    pub fn is_dragging(self) -> bool {
        matches!(
            self,
            GestureState::PressedCapturing | GestureState::Dragging
        )
    }

    pub fn is_releasing(self) -> bool {
        matches!(
            self,
            GestureState::ReleasingOpen | GestureState::ReleasingClosed
        )
    }
}

/// How a finished press resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Tap on a closed panel; nothing to animate.
    TapCancelled,
    Open,
    Close,
}

/// State captured at press time and updated on every move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub pointer: PointerId,
    pub initial_point: Point,
    pub previous_point: Point,
    pub initial_offset: f32,
    /// Direction of the latest horizontal movement, mirrored for right
    /// placement. Starts as `was_open`.
    pub pull_toward_open: bool,
    pub chrome_snapshot: Option<Visibility>,
    /// Open at press, or heading open when the press stopped a transition.
    pub was_open: bool,
    /// Resting exactly at the closed offset at press.
    pub was_closed: bool,
}

/// Borrowed collaborators for one gesture step.
#[derive(Clone, Copy)]
pub struct GestureContext<'a> {
    pub id: CharmId,
    pub model: &'a TransformModel,
    pub host: &'a CharmHost,
}

/// Drives one charm's gesture. Every step works through `&self` and holds
/// no borrow while collaborators run.
#[derive(Debug)]
pub struct GestureTracker {
    state: Rc<Cell<GestureState>>,
    session: Cell<Option<DragSession>>,
    rubber_band: RubberBand,
}

impl GestureTracker {
    pub fn new(rubber_band: RubberBand) -> Self {
        Self {
            state: Rc::new(Cell::new(GestureState::Idle)),
            session: Cell::new(None),
            rubber_band,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state.get()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.state().is_dragging()
    }

    /// Start a session. `interrupted` is the target of a transition the
    /// press just stopped, if any.
    pub fn press(
        &self,
        pointer: PointerId,
        position: Point,
        interrupted: Option<bool>,
        ctx: GestureContext<'_>,
    ) {
        if self.session.get().is_some() {
            log::debug!("{}: press while a session is active, restarting", ctx.id);
            self.abandon(ctx.host);
        }
        exclusivity::claim(ctx.id);

        let chrome_snapshot = ctx.host.chrome.as_ref().map(|chrome| {
            let visibility = chrome.visibility();
            if visibility == Visibility::Visible {
                chrome.set_visibility(Visibility::Collapsed);
            }
            visibility
        });
        if let Some(insets) = &ctx.host.insets {
            ctx.model
                .set_system_insets(insets.top_inset(), insets.window_height());
        }

        let was_open = interrupted.unwrap_or_else(|| ctx.model.is_open());
        let was_closed = ctx.model.is_closed();
        let initial_offset = ctx.model.offset();
        ctx.model.set_effects_follow_offset(true);
        ctx.model.set_surface_visible(true);

        if let Some(capture) = &ctx.host.capture {
            if !capture.capture_pointer(pointer) {
                log::debug!("{}: capture of pointer {pointer} refused", ctx.id);
            }
        }

        self.session.set(Some(DragSession {
            pointer,
            initial_point: position,
            previous_point: position,
            initial_offset,
            pull_toward_open: was_open,
            chrome_snapshot,
            was_open,
            was_closed,
        }));
        self.state.set(GestureState::PressedCapturing);
        log::debug!(
            "{}: pressed at ({}, {}), offset {initial_offset}, open {was_open}",
            ctx.id,
            position.x,
            position.y
        );
    }

    /// Follow the pointer. Returns the new offset, or `None` when `pointer`
    /// is not the one that pressed.
    pub fn drag(&self, pointer: PointerId, position: Point, model: &TransformModel) -> Option<f32> {
        let mut session = self
            .session
            .get()
            .filter(|session| session.pointer == pointer)?;
        let geometry = model.geometry();

        let step = position.dx_from(session.previous_point);
        if step != 0.0 {
            session.pull_toward_open = geometry.placement.pulls_open(step);
        }
        session.previous_point = position;
        self.session.set(Some(session));

        let offset = self.rubber_band.resist(
            position.dx_from(session.initial_point),
            session.initial_offset,
            geometry.placement,
            geometry.width,
        );
        self.state.set(GestureState::Dragging);
        model.set_offset(offset);
        log::trace!(
            "drag to x={} -> offset {offset}, toward open {}",
            position.x,
            session.pull_toward_open
        );
        Some(offset)
    }

    pub fn release(
        &self,
        pointer: PointerId,
        position: Point,
        ctx: GestureContext<'_>,
    ) -> Option<ReleaseOutcome> {
        let session = self.take_session(pointer)?;
        release_capture(&session, ctx.host);

        if position == session.initial_point && session.was_closed {
            if let (Some(chrome), Some(snapshot)) = (&ctx.host.chrome, session.chrome_snapshot) {
                chrome.set_visibility(snapshot);
            }
            exclusivity::release(ctx.id);
            ctx.model.set_surface_visible(false);
            self.state.set(GestureState::Idle);
            log::debug!("{}: tap cancelled", ctx.id);
            return Some(ReleaseOutcome::TapCancelled);
        }

        Some(self.resolve(session.pull_toward_open, ctx))
    }

    /// The host took the pointer away. Resolves to the state held at press.
    pub fn cancel(&self, pointer: PointerId, ctx: GestureContext<'_>) -> Option<ReleaseOutcome> {
        let session = self.take_session(pointer)?;
        release_capture(&session, ctx.host);
        log::debug!("{}: pointer {pointer} cancelled", ctx.id);
        Some(self.resolve(session.was_open, ctx))
    }

    /// Drop the current session without resolving it and hand it back.
    pub fn abandon(&self, host: &CharmHost) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            release_capture(session, host);
        }
        self.state.set(GestureState::Idle);
        session
    }

    /// Callback that ends a releasing state once its transition settles.
    pub fn settle_callback(&self) -> impl FnOnce() + 'static {
        let state = Rc::clone(&self.state);
        move || {
            if state.get().is_releasing() {
                state.set(GestureState::Idle);
            }
        }
    }

    fn take_session(&self, pointer: PointerId) -> Option<DragSession> {
        let session = self.session.get().filter(|session| session.pointer == pointer)?;
        self.session.set(None);
        Some(session)
    }

    fn resolve(&self, open: bool, ctx: GestureContext<'_>) -> ReleaseOutcome {
        if open {
            ctx.model.set_cover_visible(true);
            self.state.set(GestureState::ReleasingOpen);
            log::debug!("{}: released toward open", ctx.id);
            ReleaseOutcome::Open
        } else {
            exclusivity::release(ctx.id);
            ctx.model.set_cover_visible(false);
            self.state.set(GestureState::ReleasingClosed);
            log::debug!("{}: released toward closed", ctx.id);
            ReleaseOutcome::Close
        }
    }
}

fn release_capture(session: &DragSession, host: &CharmHost) {
    if let Some(capture) = &host.capture {
        capture.release_pointer_capture(session.pointer);
    }
}
