//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent`
//! consumed by the widget. Coordinates are widget-local; the host subtracts
//! the container origin before forwarding.

use kurbo::Point;

/// Which device produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Map a DOM `PointerEvent.pointerType` value. Unknown types are mice.
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64, kind: PointerKind },

    /// Pointer moved while pressed.
    PointerMove { x: f64, y: f64, kind: PointerKind },

    /// Pointer released.
    PointerUp { x: f64, y: f64, kind: PointerKind },

    /// A click delivered without a preceding press (e.g. synthetic).
    Click { x: f64, y: f64 },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            kind: PointerKind::Mouse,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            kind: PointerKind::Mouse,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            kind: PointerKind::Mouse,
        }
    }

    /// Extract the event position.
    pub fn position(&self) -> Point {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Click { x, y } => Point::new(x, y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position().is_finite()
    }
}
