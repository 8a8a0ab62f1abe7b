//! CPU rasterizer backend.
//!
//! Records draw calls with `vello_cpu`, keeps clip and texture bookkeeping in
//! integer pixels, and hands the finished [`Framebuffer`] to a
//! [`PresentTarget`] in `end_frame`.

mod canvas;
mod line;

pub use canvas::SoftTexture;
pub(crate) use canvas::nearest_paint;

use canvas::Canvas;

use crate::coords::{ColorRgba, Rect};
use crate::render::target::{Framebuffer, PresentTarget, unpremultiply};
use crate::render::textures::TextureTable;
use crate::render::{MAX_TEXTURE_DIMENSION, Renderer, TextureHandle};

pub struct SoftRenderer {
    // Field order matters: textures are released before the target goes away.
    textures: TextureTable<SoftTexture>,
    canvas: Canvas,
    clear_color: ColorRgba,
    clip: Option<Rect>,
    target: Box<dyn PresentTarget>,
}

impl SoftRenderer {
    pub fn new(target: Box<dyn PresentTarget>) -> Self {
        let (w, h) = target.size();
        log::debug!("SoftRenderer::new: drawable {w}x{h}");
        Self {
            textures: TextureTable::new(),
            canvas: Canvas::new(w, h),
            clear_color: ColorRgba::black(),
            clip: None,
            target,
        }
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// The frame as drawn so far.
    pub fn framebuffer(&mut self) -> &Framebuffer {
        self.sync_size();
        self.canvas.render()
    }

    /// Follows a target resize that happened mid-frame. What was drawn keeps
    /// its place; uncovered pixels get the clear color.
    fn sync_size(&mut self) {
        let (w, h) = self.target.size();
        if (w, h) != self.canvas.size() {
            log::debug!("SoftRenderer: drawable resized to {w}x{h}");
            self.canvas.resize(w, h, self.clear_color);
        }
    }

    /// Clip in effect: the user clip intersected with the drawable.
    #[inline]
    fn clip_area(&self) -> Option<Rect> {
        let bounds = self.canvas.bounds();
        match self.clip {
            Some(clip) => bounds.intersect(clip),
            None => (!bounds.is_empty()).then_some(bounds),
        }
    }
}

impl Renderer for SoftRenderer {
    fn set_clear_color(&mut self, color: ColorRgba) {
        self.clear_color = color;
    }

    fn begin_frame(&mut self) {
        let (w, h) = self.target.size();
        if (w, h) != self.canvas.size() {
            log::debug!("SoftRenderer: drawable resized to {w}x{h}");
        }
        // Clearing ignores the clip rectangle.
        self.canvas.clear(w, h, self.clear_color);
    }

    fn end_frame(&mut self) {
        self.sync_size();
        let frame = self.canvas.render();
        if let Err(e) = self.target.present(frame) {
            log::debug!("SoftRenderer: present failed: {e}");
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: ColorRgba) {
        self.sync_size();
        if let Some(area) = self.clip_area().and_then(|clip| rect.intersect(clip)) {
            self.canvas.fill(area, color);
        }
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorRgba) {
        if color.a == 0 {
            return;
        }
        self.sync_size();
        let Some(clip) = self.clip_area() else {
            return;
        };
        for span in line::spans((x1, y1), (x2, y2), clip) {
            self.canvas.fill(span, color);
        }
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = Some(rect);
    }

    fn clear_clip_rect(&mut self) {
        self.clip = None;
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.target.size()
    }

    fn create_texture_rgba(
        &mut self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        pitch: usize,
    ) -> TextureHandle {
        if width == 0 || height == 0 || width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            log::debug!("create_texture_rgba: rejected size {width}x{height}");
            return TextureHandle::INVALID;
        }

        let texture = match pixels {
            Some(src) => SoftTexture::from_rgba(width, height, src, pitch),
            None => SoftTexture::blank(width, height),
        };
        let Some(texture) = texture else {
            log::debug!("create_texture_rgba: pixel data too short for {width}x{height} pitch {pitch}");
            return TextureHandle::INVALID;
        };

        self.textures.insert(texture)
    }

    fn draw_texture(&mut self, texture: TextureHandle, dst: Rect) {
        if !self.textures.contains(texture) {
            return;
        }
        self.sync_size();
        let Some(visible) = self.clip_area().and_then(|clip| dst.intersect(clip)) else {
            return;
        };
        if let Some(tex) = self.textures.get(texture) {
            self.canvas.draw_texture(tex, dst, visible);
        }
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(texture);
    }

    fn read_pixels_argb8888(&mut self, dst: &mut [u8], pitch: usize, width: u32, height: u32) -> bool {
        self.sync_size();
        let frame = self.canvas.render();
        let (fw, fh) = frame.size();
        if width == 0 || height == 0 || width > fw || height > fh {
            return false;
        }
        let row = width as usize * 4;
        if pitch < row {
            return false;
        }
        let needed = pitch * (height as usize - 1) + row;
        if dst.len() < needed {
            return false;
        }

        let src = frame.pixels();
        let src_pitch = frame.pitch();
        for y in 0..height as usize {
            let src_row = &src[y * src_pitch..y * src_pitch + row];
            let dst_row = &mut dst[y * pitch..y * pitch + row];
            for (s, d) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(4)) {
                let argb = unpremultiply([s[0], s[1], s[2], s[3]]).to_argb();
                d.copy_from_slice(&argb.to_ne_bytes());
            }
        }
        true
    }
}

impl Drop for SoftRenderer {
    fn drop(&mut self) {
        let released = self.textures.release_all();
        if released > 0 {
            log::debug!("SoftRenderer: released {released} textures on drop");
        }
    }
}
