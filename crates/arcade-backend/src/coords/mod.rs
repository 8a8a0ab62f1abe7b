//! Color and geometry value types shared by the renderer, text layer and callers.
//!
//! Canonical space:
//! - drawable (backing-buffer) pixels
//! - origin top-left
//! - +X right, +Y down

mod color;
mod rect;

pub use color::ColorRgba;
pub use rect::Rect;
