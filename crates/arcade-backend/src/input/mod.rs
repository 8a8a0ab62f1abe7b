//! Input normalization.
//!
//! Platform events arrive as [`RawEvent`]s in window-logical coordinates.
//! [`Input::poll`] drains them and rewrites pointer coordinates into drawable
//! pixels, so callers hit-test in the same space they draw in.
//!
//! Public API is platform-agnostic and does not expose winit types.

mod normalize;
pub(crate) mod platform;
mod raw;
mod types;

pub use normalize::{Input, PointerScale};
pub use raw::{EventSource, RawEvent};
pub use types::{Event, EventKind, Key, Modifiers, MouseButton, MouseWheelDelta};
