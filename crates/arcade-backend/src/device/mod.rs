//! Window presentation over wgpu.
//!
//! The software renderer produces finished RGBA frames on the CPU; this module
//! owns the GPU objects that get them on screen: device and queue, the window
//! surface, and a single blit pipeline.

mod gpu;
mod present;
mod surface;
mod target;

pub use gpu::{Gpu, SurfaceErrorAction};
pub use target::WindowTarget;
