use std::cell::Cell;
use std::rc::Rc;

use vello_cpu::Pixmap;
use vello_cpu::peniko::color::PremulRgba8;

use crate::coords::ColorRgba;
use crate::error::BackendError;

/// Finished frame: premultiplied RGBA8, tightly packed rows.
///
/// Backed by a `vello_cpu` pixmap, so each edge is capped at `u16::MAX`.
pub struct Framebuffer {
    pixmap: Pixmap,
}

impl Framebuffer {
    /// Transparent buffer. Edges beyond `u16::MAX` are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = Self::clamp_size(width, height);
        Self {
            pixmap: Pixmap::new(w, h),
        }
    }

    /// The size a buffer requested as `width x height` actually gets.
    pub(crate) fn clamp_size(width: u32, height: u32) -> (u16, u16) {
        let clamp = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
        (clamp(width), clamp(height))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    #[inline]
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Bytes per row.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width() as usize * 4
    }

    /// Premultiplied RGBA8 bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Resets every pixel to transparent black.
    pub(crate) fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorRgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = (y as usize * self.width() as usize + x as usize) * 4;
        let p = &self.pixels()[i..i + 4];
        Some(unpremultiply([p[0], p[1], p[2], p[3]]))
    }
}

/// Straight RGBA8 to premultiplied, rounding to nearest.
#[inline]
pub(crate) fn premultiply(r: u8, g: u8, b: u8, a: u8) -> PremulRgba8 {
    let a16 = u16::from(a);
    let mul = |c: u8| ((u16::from(c) * a16 + 127) / 255) as u8;
    PremulRgba8 {
        r: mul(r),
        g: mul(g),
        b: mul(b),
        a,
    }
}

/// Premultiplied RGBA8 back to a straight color. Transparent pixels come back
/// as transparent black.
#[inline]
pub(crate) fn unpremultiply(p: [u8; 4]) -> ColorRgba {
    let a = u32::from(p[3]);
    if a == 0 {
        return ColorRgba::new(0, 0, 0, 0);
    }
    let div = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    ColorRgba::new(div(p[0]), div(p[1]), div(p[2]), p[3])
}

/// Where a finished frame goes.
///
/// The target owns the authoritative drawable size; the renderer follows it
/// before every draw and readback.
pub trait PresentTarget {
    /// Current backing-buffer size in pixels.
    fn size(&self) -> (u32, u32);

    /// Displays `frame`.
    fn present(&mut self, frame: &Framebuffer) -> Result<(), BackendError>;
}

/// Off-screen target for tests and tools. Presents by counting.
#[derive(Debug)]
pub struct HeadlessTarget {
    state: Rc<HeadlessState>,
}

#[derive(Debug)]
struct HeadlessState {
    size: Cell<(u32, u32)>,
    presented: Cell<u64>,
}

/// Shared view of a [`HeadlessTarget`] that stays usable after the target is
/// boxed into a renderer.
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    state: Rc<HeadlessState>,
}

impl HeadlessTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(HeadlessState {
                size: Cell::new((width, height)),
                presented: Cell::new(0),
            }),
        }
    }

    pub fn handle(&self) -> HeadlessHandle {
        HeadlessHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl HeadlessHandle {
    /// Changes the size reported to the renderer, as a window resize would.
    pub fn resize(&self, width: u32, height: u32) {
        self.state.size.set((width, height));
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.state.presented.get()
    }
}

impl PresentTarget for HeadlessTarget {
    fn size(&self) -> (u32, u32) {
        self.state.size.get()
    }

    fn present(&mut self, _frame: &Framebuffer) -> Result<(), BackendError> {
        self.state.presented.set(self.state.presented.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_starts_transparent() {
        let fb = Framebuffer::new(3, 2);
        assert_eq!(fb.pixels().len(), 24);
        assert_eq!(fb.pitch(), 12);
        assert_eq!(fb.pixel(2, 1), Some(ColorRgba::new(0, 0, 0, 0)));
        assert_eq!(fb.pixel(3, 0), None);
    }

    #[test]
    fn oversized_framebuffer_is_clamped() {
        assert_eq!(Framebuffer::clamp_size(70_000, 5), (u16::MAX, 5));
    }

    #[test]
    fn pixel_reads_back_straight_alpha() {
        let mut fb = Framebuffer::new(1, 1);
        let p = premultiply(200, 100, 50, 128);
        fb.pixmap_mut()
            .data_as_u8_slice_mut()
            .copy_from_slice(&[p.r, p.g, p.b, p.a]);
        let c = fb.pixel(0, 0).unwrap();
        assert_eq!(c.a, 128);
        assert!(c.r.abs_diff(200) <= 1 && c.g.abs_diff(100) <= 1 && c.b.abs_diff(50) <= 1);

        fb.clear();
        assert_eq!(fb.pixel(0, 0), Some(ColorRgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn opaque_colors_survive_premultiplication() {
        let p = premultiply(1, 2, 3, 255);
        assert_eq!(unpremultiply([p.r, p.g, p.b, p.a]), ColorRgba::new(1, 2, 3, 255));
        let p = premultiply(9, 9, 9, 0);
        assert_eq!([p.r, p.g, p.b, p.a], [0, 0, 0, 0]);
    }

    #[test]
    fn headless_handle_tracks_target() {
        let mut target = HeadlessTarget::new(10, 10);
        let handle = target.handle();
        handle.resize(20, 5);
        assert_eq!(target.size(), (20, 5));
        target.present(&Framebuffer::new(1, 1)).unwrap();
        assert_eq!(handle.presented_frames(), 1);
    }
}
