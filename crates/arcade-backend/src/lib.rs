//! Arcade backend crate.
//!
//! Owns one window, an immediate-mode 2D renderer, a text layer, an input
//! normalizer, an audio mixer and a frame-capture utility, wired together by
//! [`backend::Backend`]. Callers drive the frame loop themselves:
//! poll events, `begin_frame`, draw, `end_frame`.

pub mod audio;
pub mod backend;
pub mod capture;
pub mod config;
pub mod coords;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod text;
pub mod window;

pub use audio::{Audio, AudioError};
pub use backend::Backend;
pub use capture::{Capture, CaptureError, PixelBuffer};
pub use config::{AudioConfig, BackendConfig, RenderApi, RenderConfig, TextConfig, WindowConfig};
pub use coords::{ColorRgba, Rect};
pub use error::{BackendError, ConfigError};
pub use input::{Event, EventKind, Key, Modifiers, MouseButton, MouseWheelDelta};
pub use render::{Renderer, TextureHandle};
pub use text::{FontId, FontLoadError, FontTextRenderer, TextRenderer};
