use charm_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The host took the pointer away (capture lost, window deactivated).
    Cancel,
}

/// Pointer event in the panel's local coordinate space.
///
/// Consumption is shared between copies of the event so a host can tell
/// whether the panel handled it.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y))
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Mark this event as handled.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_position() {
        let event = PointerEvent::up(12.0, 3.0);
        assert_eq!(event.kind, PointerEventKind::Up);
        assert_eq!(event.position, Point::new(12.0, 3.0));
        assert_eq!(event.id, 0);
        assert!(!event.is_consumed());
        assert_eq!(PointerEvent::cancel(0.0, 0.0).kind, PointerEventKind::Cancel);
    }

    #[test]
    fn consumption_is_shared_between_copies() {
        let event = PointerEvent::moved(4.0, 2.0).with_id(7);
        let copy = event.clone();
        copy.consume();
        assert!(event.is_consumed());
        assert_eq!(event.id, 7);
    }
}
