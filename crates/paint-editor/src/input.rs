//! Input abstraction layer.
//!
//! Normalizes canvas mouse events and keyboard input into a unified
//! `InputEvent` enum. Positions are relative to the canvas origin.

/// A normalized input event delivered to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the canvas.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the canvas, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Pointer released on the canvas.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas bounds.
    PointerLeave,

    /// Single click on the canvas.
    Click { x: f64, y: f64 },

    /// Double click on the canvas, carrying the text field's value.
    DoubleClick { x: f64, y: f64, text: String },

    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_constructors_keep_coordinates() {
        assert_eq!(
            InputEvent::from_pointer_down(3.0, 4.0),
            InputEvent::PointerDown { x: 3.0, y: 4.0 }
        );
        assert_eq!(
            InputEvent::from_pointer_move(5.5, 0.0),
            InputEvent::PointerMove { x: 5.5, y: 0.0 }
        );
        assert_eq!(
            InputEvent::from_pointer_up(7.0, 8.0),
            InputEvent::PointerUp { x: 7.0, y: 8.0 }
        );
    }
}
