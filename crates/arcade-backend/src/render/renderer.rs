use crate::coords::{ColorRgba, Rect};

/// Opaque reference to a renderer-owned texture.
///
/// Handles are allocated from 1 upwards per renderer instance and never reused;
/// [`TextureHandle::INVALID`] (0) means "no texture". A handle is meaningless to
/// any renderer other than the one that issued it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub const INVALID: TextureHandle = TextureHandle(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Immediate-mode 2D renderer contract.
///
/// Every backend satisfies this set: frame lifecycle, primitives, clipping,
/// texture management and pixel readback. Operational failures never panic and
/// never return errors; they are no-ops, [`TextureHandle::INVALID`] or `false`.
pub trait Renderer {
    /// Stores the color used by the next [`begin_frame`](Self::begin_frame).
    fn set_clear_color(&mut self, color: ColorRgba);

    /// Clears the whole drawable to the clear color. Call once per frame before drawing.
    fn begin_frame(&mut self);

    /// Presents the accumulated drawing.
    fn end_frame(&mut self);

    /// Fills `rect` with `color`, alpha-blended over the current frame.
    fn draw_rect(&mut self, rect: Rect, color: ColorRgba);

    /// Draws a one-pixel line; both endpoints are included.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorRgba);

    /// Restricts subsequent drawing to `rect` until changed or cleared.
    ///
    /// The clip persists across frames.
    fn set_clip_rect(&mut self, rect: Rect);

    fn clear_clip_rect(&mut self);

    /// Backing-buffer resolution; may differ from the window's logical size.
    fn drawable_size(&self) -> (u32, u32);

    /// Allocates a texture, uploading `pixels` (RGBA8, `pitch` bytes per row) when given.
    ///
    /// Returns [`TextureHandle::INVALID`] on failure.
    fn create_texture_rgba(
        &mut self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        pitch: usize,
    ) -> TextureHandle;

    /// Draws `texture` scaled into `dst`. Unknown or invalid handles are ignored.
    fn draw_texture(&mut self, texture: TextureHandle, dst: Rect);

    /// Releases `texture`. Unknown or already destroyed handles are ignored.
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Copies the region `(0, 0, width, height)` of the backing buffer into `dst`
    /// as ARGB8888 (native-endian `0xAARRGGBB` words), `pitch` bytes per row.
    ///
    /// Returns `false` when the region cannot be read.
    fn read_pixels_argb8888(&mut self, dst: &mut [u8], pitch: usize, width: u32, height: u32) -> bool;

    /// Row pitch this backend reports for a readback `width` pixels wide.
    fn readback_pitch(&self, width: u32) -> usize {
        width as usize * 4
    }
}
