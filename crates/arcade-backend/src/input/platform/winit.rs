use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{Key, Modifiers, MouseButton, MouseWheelDelta, RawEvent};

/// Turns winit window events into [`RawEvent`]s.
///
/// winit reports the cursor only on motion and modifiers only on change, so both
/// are tracked here to fill in motion deltas, button coordinates and key modifiers.
#[derive(Debug, Default)]
pub(crate) struct WinitTranslator {
    modifiers: Modifiers,
    /// Last cursor position, window-logical.
    cursor: Option<(f64, f64)>,
}

impl WinitTranslator {
    /// Appends the raw events for `event` to `out`.
    ///
    /// `scale_factor` converts winit's physical positions and sizes to logical ones.
    pub(crate) fn translate(&mut self, scale_factor: f64, event: &WindowEvent, out: &mut Vec<RawEvent>) {
        match event {
            WindowEvent::CloseRequested => out.push(RawEvent::Quit),

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = map_modifiers(m.state());
                out.push(RawEvent::WindowChanged);
            }

            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                // Synthetic presses are replayed on focus gain; the caller never typed them.
                if *is_synthetic {
                    return;
                }
                let (key, scancode) = map_key(event.physical_key);
                match event.state {
                    ElementState::Pressed => {
                        out.push(RawEvent::KeyDown {
                            key,
                            scancode,
                            modifiers: self.modifiers,
                            repeat: event.repeat,
                        });
                        if let Some(text) = self.key_text(event.text.as_deref()) {
                            out.push(RawEvent::TextInput(text));
                        }
                    }
                    ElementState::Released => out.push(RawEvent::KeyUp {
                        key,
                        scancode,
                        modifiers: self.modifiers,
                    }),
                }
            }

            WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => {
                out.push(RawEvent::TextInput(text.clone()));
            }

            WindowEvent::CursorMoved { position, .. } => {
                out.push(self.cursor_moved(to_logical(scale_factor, *position)));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                out.push(self.mouse_button(*state == ElementState::Pressed, map_mouse_button(*button)));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
                    MouseScrollDelta::PixelDelta(p) => {
                        let (x, y) = to_logical(scale_factor, *p);
                        MouseWheelDelta::Pixel {
                            x: x as f32,
                            y: y as f32,
                        }
                    }
                };
                out.push(RawEvent::MouseWheel { delta });
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<u32>(scale_factor);
                out.push(RawEvent::WindowResized {
                    width: logical.width,
                    height: logical.height,
                });
            }

            // Logical size is unknown here; the normalizer reports the drawable size.
            WindowEvent::ScaleFactorChanged { .. } => out.push(RawEvent::WindowResized {
                width: 0,
                height: 0,
            }),

            WindowEvent::Focused(_)
            | WindowEvent::Moved(_)
            | WindowEvent::Occluded(_)
            | WindowEvent::CursorEntered { .. }
            | WindowEvent::RedrawRequested
            | WindowEvent::ThemeChanged(_)
            | WindowEvent::Ime(_) => out.push(RawEvent::WindowChanged),

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                out.push(RawEvent::WindowChanged);
            }

            _ => out.push(RawEvent::Unrecognized),
        }
    }

    fn cursor_moved(&mut self, (x, y): (f64, f64)) -> RawEvent {
        let (dx, dy) = match self.cursor {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        self.cursor = Some((x, y));
        RawEvent::MouseMotion { x, y, dx, dy }
    }

    fn mouse_button(&self, pressed: bool, button: MouseButton) -> RawEvent {
        let (x, y) = self.cursor.unwrap_or((0.0, 0.0));
        if pressed {
            RawEvent::MouseButtonDown { button, x, y }
        } else {
            RawEvent::MouseButtonUp { button, x, y }
        }
    }

    /// Printable text produced by a key press, if it should reach the caller.
    ///
    /// Control characters and shortcut chords (Ctrl/Meta held) produce none.
    fn key_text(&self, text: Option<&str>) -> Option<String> {
        if self.modifiers.intersects(Modifiers::CTRL | Modifiers::META) {
            return None;
        }
        text.filter(|t| !t.is_empty() && !t.chars().any(char::is_control))
            .map(str::to_owned)
    }
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x, logical.y)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, m.shift_key());
    out.set(Modifiers::CTRL, m.control_key());
    out.set(Modifiers::ALT, m.alt_key());
    out.set(Modifiers::META, m.super_key());
    out
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => (key_for_code(code), code as u32),
        // Native codes carry no portable number.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

fn key_for_code(code: KeyCode) -> Key {
    use KeyCode as C;

    match code {
        C::Escape => Key::Escape,
        C::Enter | C::NumpadEnter => Key::Enter,
        C::Tab => Key::Tab,
        C::Backspace => Key::Backspace,
        C::Space => Key::Space,
        C::Minus => Key::Minus,
        C::Equal => Key::Equal,
        C::Comma => Key::Comma,
        C::Period => Key::Period,
        C::Slash => Key::Slash,

        C::Insert => Key::Insert,
        C::Delete => Key::Delete,
        C::Home => Key::Home,
        C::End => Key::End,
        C::PageUp => Key::PageUp,
        C::PageDown => Key::PageDown,

        C::ArrowUp => Key::ArrowUp,
        C::ArrowDown => Key::ArrowDown,
        C::ArrowLeft => Key::ArrowLeft,
        C::ArrowRight => Key::ArrowRight,

        C::ShiftLeft | C::ShiftRight => Key::Shift,
        C::ControlLeft | C::ControlRight => Key::Control,
        C::AltLeft | C::AltRight => Key::Alt,
        C::SuperLeft | C::SuperRight => Key::Meta,

        C::KeyA => Key::A,
        C::KeyB => Key::B,
        C::KeyC => Key::C,
        C::KeyD => Key::D,
        C::KeyE => Key::E,
        C::KeyF => Key::F,
        C::KeyG => Key::G,
        C::KeyH => Key::H,
        C::KeyI => Key::I,
        C::KeyJ => Key::J,
        C::KeyK => Key::K,
        C::KeyL => Key::L,
        C::KeyM => Key::M,
        C::KeyN => Key::N,
        C::KeyO => Key::O,
        C::KeyP => Key::P,
        C::KeyQ => Key::Q,
        C::KeyR => Key::R,
        C::KeyS => Key::S,
        C::KeyT => Key::T,
        C::KeyU => Key::U,
        C::KeyV => Key::V,
        C::KeyW => Key::W,
        C::KeyX => Key::X,
        C::KeyY => Key::Y,
        C::KeyZ => Key::Z,

        C::Digit0 => Key::Digit0,
        C::Digit1 => Key::Digit1,
        C::Digit2 => Key::Digit2,
        C::Digit3 => Key::Digit3,
        C::Digit4 => Key::Digit4,
        C::Digit5 => Key::Digit5,
        C::Digit6 => Key::Digit6,
        C::Digit7 => Key::Digit7,
        C::Digit8 => Key::Digit8,
        C::Digit9 => Key::Digit9,

        C::Numpad0 => Key::Numpad(0),
        C::Numpad1 => Key::Numpad(1),
        C::Numpad2 => Key::Numpad(2),
        C::Numpad3 => Key::Numpad(3),
        C::Numpad4 => Key::Numpad(4),
        C::Numpad5 => Key::Numpad(5),
        C::Numpad6 => Key::Numpad(6),
        C::Numpad7 => Key::Numpad(7),
        C::Numpad8 => Key::Numpad(8),
        C::Numpad9 => Key::Numpad(9),

        C::F1 => Key::F1,
        C::F2 => Key::F2,
        C::F3 => Key::F3,
        C::F4 => Key::F4,
        C::F5 => Key::F5,
        C::F6 => Key::F6,
        C::F7 => Key::F7,
        C::F8 => Key::F8,
        C::F9 => Key::F9,
        C::F10 => Key::F10,
        C::F11 => Key::F11,
        C::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_motion_has_zero_delta() {
        let mut t = WinitTranslator::default();
        assert_eq!(
            t.cursor_moved((10.0, 20.0)),
            RawEvent::MouseMotion { x: 10.0, y: 20.0, dx: 0.0, dy: 0.0 }
        );
        assert_eq!(
            t.cursor_moved((12.5, 18.0)),
            RawEvent::MouseMotion { x: 12.5, y: 18.0, dx: 2.5, dy: -2.0 }
        );
    }

    #[test]
    fn buttons_use_last_cursor_position() {
        let mut t = WinitTranslator::default();
        assert_eq!(
            t.mouse_button(true, MouseButton::Left),
            RawEvent::MouseButtonDown { button: MouseButton::Left, x: 0.0, y: 0.0 }
        );
        t.cursor_moved((3.0, 4.0));
        assert_eq!(
            t.mouse_button(false, MouseButton::Right),
            RawEvent::MouseButtonUp { button: MouseButton::Right, x: 3.0, y: 4.0 }
        );
    }

    #[test]
    fn key_text_filters_control_and_shortcuts() {
        let mut t = WinitTranslator::default();
        assert_eq!(t.key_text(Some("a")), Some("a".to_owned()));
        assert_eq!(t.key_text(Some("\u{8}")), None);
        assert_eq!(t.key_text(Some("\r")), None);
        assert_eq!(t.key_text(None), None);

        t.modifiers = Modifiers::CTRL;
        assert_eq!(t.key_text(Some("c")), None);
        t.modifiers = Modifiers::SHIFT;
        assert_eq!(t.key_text(Some("C")), Some("C".to_owned()));
    }

    #[test]
    fn modifier_state_maps_to_flags() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::ALT);
        assert_eq!(m, Modifiers::SHIFT | Modifiers::ALT);
        assert!(map_modifiers(ModifiersState::empty()).is_empty());
    }

    #[test]
    fn physical_keys_map() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)).0, Key::A);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F12)).0, Key::F12);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)).0, Key::Enter);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad7)).0, Key::Numpad(7));
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::NumpadAdd)).0, Key::Unknown(_)));
    }
}
