use std::fmt;

/// Keyboard key identifier.
///
/// The platform layer maps physical key codes into these variants where possible.
/// Unsupported keys use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Minus,
    Equal,
    Comma,
    Period,
    Slash,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Keypad digit 0..=9. Keypad Enter reports [`Key::Enter`].
    Numpad(u8),

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

bitflags::bitflags! {
    /// Modifier keys held when an event was generated.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

/// Mouse wheel delta, passed through unscaled.
///
/// `Line` is "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum EventKind {
    Quit,
    KeyDown,
    KeyUp,
    MouseMotion,
    MouseButtonDown,
    MouseButtonUp,
    MouseWheel,
    WindowResized,
    TextInput,
    #[default]
    Unknown,
}

/// Normalized input event.
///
/// Only the fields relevant to `kind` are meaningful; the rest hold their
/// `Default` values.
///
/// | kind | fields |
/// |---|---|
/// | `KeyDown`, `KeyUp` | `key`, `scancode`, `modifiers`, `repeat` |
/// | `MouseMotion` | `x`, `y`, `dx`, `dy` (drawable pixels) |
/// | `MouseButtonDown`, `MouseButtonUp` | `button`, `x`, `y` (drawable pixels) |
/// | `MouseWheel` | `wheel` |
/// | `WindowResized` | `width`, `height` (drawable pixels) |
/// | `TextInput` | `text` |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub kind: EventKind,

    pub key: Option<Key>,
    pub scancode: u32,
    pub modifiers: Modifiers,
    pub repeat: bool,

    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub button: Option<MouseButton>,
    pub wheel: Option<MouseWheelDelta>,

    pub width: u32,
    pub height: u32,

    pub text: String,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_quit(&self) -> bool {
        self.kind == EventKind::Quit
    }
}
