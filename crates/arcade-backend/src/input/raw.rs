use super::types::{Key, Modifiers, MouseButton, MouseWheelDelta};

/// Platform event before normalization.
///
/// Pointer coordinates are window-logical and may be fractional.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    Quit,
    KeyDown {
        key: Key,
        scancode: u32,
        modifiers: Modifiers,
        repeat: bool,
    },
    KeyUp {
        key: Key,
        scancode: u32,
        modifiers: Modifiers,
    },
    MouseMotion {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
    },
    MouseButtonDown {
        button: MouseButton,
        x: f64,
        y: f64,
    },
    MouseButtonUp {
        button: MouseButton,
        x: f64,
        y: f64,
    },
    MouseWheel {
        delta: MouseWheelDelta,
    },
    TextInput(String),
    /// Logical size after a resize; the normalizer reports the drawable size instead.
    WindowResized {
        width: u32,
        height: u32,
    },
    /// Window bookkeeping the caller never sees (focus, move, occlusion).
    WindowChanged,
    Unrecognized,
}

/// Supplier of raw events. Implemented by [`Window`](crate::window::Window).
pub trait EventSource {
    /// Drains everything pending without blocking.
    fn poll_raw_events(&mut self) -> Vec<RawEvent>;

    /// Current window size in logical units.
    fn logical_size(&self) -> (u32, u32);
}
