use crate::render::Renderer;

use super::raw::{EventSource, RawEvent};
use super::types::{Event, EventKind};

/// Per-axis factor from window-logical units to drawable pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerScale {
    pub x: f64,
    pub y: f64,
}

impl PointerScale {
    pub const IDENTITY: PointerScale = PointerScale { x: 1.0, y: 1.0 };

    /// Ratio `drawable / window` per axis.
    ///
    /// A window reporting zero on either axis (minimized, mid-teardown) yields the
    /// identity so no division by zero can occur.
    pub fn between(window: (u32, u32), drawable: (u32, u32)) -> Self {
        let (ww, wh) = window;
        let (dw, dh) = drawable;
        if ww == 0 || wh == 0 {
            return Self::IDENTITY;
        }
        Self {
            x: f64::from(dw) / f64::from(ww),
            y: f64::from(dh) / f64::from(wh),
        }
    }

    /// Scales a point or delta and rounds half away from zero.
    #[inline]
    pub fn apply(self, x: f64, y: f64) -> (i32, i32) {
        ((x * self.x).round() as i32, (y * self.y).round() as i32)
    }
}

impl Default for PointerScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts raw platform events into [`Event`]s in drawable coordinates.
#[derive(Debug, Default)]
pub struct Input {
    scale: PointerScale,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale applied by the most recent [`poll`](Self::poll).
    pub fn pointer_scale(&self) -> PointerScale {
        self.scale
    }

    /// Drains all pending events from `source`, in arrival order.
    ///
    /// Never blocks. Window bookkeeping events are dropped; unrecognized ones are
    /// reported as [`EventKind::Unknown`].
    pub fn poll(&mut self, source: &mut dyn EventSource, renderer: &dyn Renderer) -> Vec<Event> {
        let raw = source.poll_raw_events();
        if raw.is_empty() {
            return Vec::new();
        }

        let drawable = renderer.drawable_size();
        self.scale = PointerScale::between(source.logical_size(), drawable);

        raw.into_iter()
            .filter_map(|ev| normalize(ev, self.scale, drawable))
            .collect()
    }
}

fn normalize(raw: RawEvent, scale: PointerScale, drawable: (u32, u32)) -> Option<Event> {
    let event = match raw {
        RawEvent::Quit => Event::new(EventKind::Quit),

        RawEvent::KeyDown {
            key,
            scancode,
            modifiers,
            repeat,
        } => Event {
            key: Some(key),
            scancode,
            modifiers,
            repeat,
            ..Event::new(EventKind::KeyDown)
        },

        RawEvent::KeyUp {
            key,
            scancode,
            modifiers,
        } => Event {
            key: Some(key),
            scancode,
            modifiers,
            ..Event::new(EventKind::KeyUp)
        },

        RawEvent::MouseMotion { x, y, dx, dy } => {
            let (x, y) = scale.apply(x, y);
            let (dx, dy) = scale.apply(dx, dy);
            Event {
                x,
                y,
                dx,
                dy,
                ..Event::new(EventKind::MouseMotion)
            }
        }

        RawEvent::MouseButtonDown { button, x, y } => {
            let (x, y) = scale.apply(x, y);
            Event {
                button: Some(button),
                x,
                y,
                ..Event::new(EventKind::MouseButtonDown)
            }
        }

        RawEvent::MouseButtonUp { button, x, y } => {
            let (x, y) = scale.apply(x, y);
            Event {
                button: Some(button),
                x,
                y,
                ..Event::new(EventKind::MouseButtonUp)
            }
        }

        RawEvent::MouseWheel { delta } => Event {
            wheel: Some(delta),
            ..Event::new(EventKind::MouseWheel)
        },

        RawEvent::TextInput(text) => Event {
            text,
            ..Event::new(EventKind::TextInput)
        },

        // The logical size in the raw event is ignored; callers want pixels.
        RawEvent::WindowResized { .. } => Event {
            width: drawable.0,
            height: drawable.1,
            ..Event::new(EventKind::WindowResized)
        },

        RawEvent::WindowChanged => return None,
        RawEvent::Unrecognized => Event::new(EventKind::Unknown),
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, Modifiers, MouseButton, MouseWheelDelta};
    use crate::render::{HeadlessTarget, SoftRenderer};

    struct Scripted {
        logical: (u32, u32),
        pending: Vec<RawEvent>,
    }

    impl Scripted {
        fn new(logical: (u32, u32), pending: Vec<RawEvent>) -> Self {
            Self { logical, pending }
        }
    }

    impl EventSource for Scripted {
        fn poll_raw_events(&mut self) -> Vec<RawEvent> {
            std::mem::take(&mut self.pending)
        }

        fn logical_size(&self) -> (u32, u32) {
            self.logical
        }
    }

    fn renderer(w: u32, h: u32) -> SoftRenderer {
        SoftRenderer::new(Box::new(HeadlessTarget::new(w, h)))
    }

    fn poll(logical: (u32, u32), drawable: (u32, u32), raw: Vec<RawEvent>) -> Vec<Event> {
        let r = renderer(drawable.0, drawable.1);
        Input::new().poll(&mut Scripted::new(logical, raw), &r)
    }

    #[test]
    fn hidpi_motion_is_rescaled() {
        let events = poll(
            (800, 600),
            (1600, 1200),
            vec![RawEvent::MouseMotion {
                x: 100.0,
                y: 50.0,
                dx: 5.0,
                dy: -5.0,
            }],
        );
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.kind, EventKind::MouseMotion);
        assert_eq!((e.x, e.y, e.dx, e.dy), (200, 100, 10, -10));
    }

    #[test]
    fn one_to_one_is_identity() {
        let events = poll(
            (640, 480),
            (640, 480),
            vec![RawEvent::MouseButtonDown {
                button: MouseButton::Left,
                x: 13.0,
                y: 7.0,
            }],
        );
        assert_eq!((events[0].x, events[0].y), (13, 7));
        assert_eq!(events[0].button, Some(MouseButton::Left));
    }

    #[test]
    fn zero_window_size_is_identity() {
        let events = poll(
            (0, 600),
            (1600, 1200),
            vec![RawEvent::MouseButtonUp {
                button: MouseButton::Right,
                x: 42.0,
                y: 24.0,
            }],
        );
        assert_eq!((events[0].x, events[0].y), (42, 24));
    }

    #[test]
    fn fractional_coordinates_round_half_away_from_zero() {
        let scale = PointerScale::between((2, 2), (3, 3));
        assert_eq!(scale.apply(1.0, -1.0), (2, -2));
        assert_eq!(PointerScale::IDENTITY.apply(0.4, 0.6), (0, 1));
    }

    #[test]
    fn keyboard_fields_are_copied() {
        let events = poll(
            (100, 100),
            (200, 200),
            vec![
                RawEvent::KeyDown {
                    key: Key::A,
                    scancode: 30,
                    modifiers: Modifiers::SHIFT,
                    repeat: true,
                },
                RawEvent::KeyUp {
                    key: Key::A,
                    scancode: 30,
                    modifiers: Modifiers::empty(),
                },
            ],
        );
        assert_eq!(events[0].kind, EventKind::KeyDown);
        assert_eq!(events[0].key, Some(Key::A));
        assert_eq!(events[0].scancode, 30);
        assert_eq!(events[0].modifiers, Modifiers::SHIFT);
        assert!(events[0].repeat);
        assert_eq!(events[1].kind, EventKind::KeyUp);
        assert!(!events[1].repeat);
    }

    #[test]
    fn wheel_is_not_scaled() {
        let delta = MouseWheelDelta::Line { x: 0.0, y: -3.0 };
        let events = poll((100, 100), (200, 200), vec![RawEvent::MouseWheel { delta }]);
        assert_eq!(events[0].kind, EventKind::MouseWheel);
        assert_eq!(events[0].wheel, Some(delta));
    }

    #[test]
    fn resize_reports_drawable_size() {
        let events = poll(
            (800, 600),
            (1600, 1200),
            vec![RawEvent::WindowResized {
                width: 800,
                height: 600,
            }],
        );
        assert_eq!(events[0].kind, EventKind::WindowResized);
        assert_eq!((events[0].width, events[0].height), (1600, 1200));
    }

    #[test]
    fn window_changes_dropped_and_order_kept() {
        let events = poll(
            (10, 10),
            (10, 10),
            vec![
                RawEvent::TextInput("é".into()),
                RawEvent::WindowChanged,
                RawEvent::Unrecognized,
                RawEvent::Quit,
            ],
        );
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::TextInput, EventKind::Unknown, EventKind::Quit]);
        assert_eq!(events[0].text, "é");
    }

    #[test]
    fn empty_queue_yields_nothing() {
        assert!(poll((10, 10), (10, 10), Vec::new()).is_empty());
    }
}
