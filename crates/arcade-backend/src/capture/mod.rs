//! Frame capture.
//!
//! Reads the renderer's current backing buffer, either into memory or into a
//! 32-bpp BMP file. Capture may run any time between `begin_frame` and the next
//! `begin_frame`; it reads whatever has been drawn so far.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::Renderer;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("drawable size is {0}x{1}")]
    EmptyDrawable(u32, u32),

    #[error("renderer could not read back {width}x{height} pixels")]
    ReadFailed { width: u32, height: u32 },

    #[error("pixel buffer does not match its dimensions")]
    Malformed,

    #[error("BMP encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Capture;

impl Capture {
    pub fn new() -> Self {
        Self
    }

    /// Reads the whole drawable as ARGB8888 with the renderer's reported pitch.
    pub fn capture_argb8888(&self, renderer: &mut dyn Renderer) -> Result<PixelBuffer, CaptureError> {
        let (width, height) = renderer.drawable_size();
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyDrawable(width, height));
        }

        let pitch = renderer.readback_pitch(width);
        let mut bytes = vec![0u8; pitch * height as usize];
        if !renderer.read_pixels_argb8888(&mut bytes, pitch, width, height) {
            return Err(CaptureError::ReadFailed { width, height });
        }

        Ok(PixelBuffer {
            width,
            height,
            pitch,
            bytes,
        })
    }

    /// Writes the drawable to `path` as a 32-bpp BMP.
    ///
    /// The file is encoded in memory first; nothing is written on failure.
    pub fn save_bmp(&self, renderer: &mut dyn Renderer, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let path = path.as_ref();
        let pixels = self.capture_argb8888(renderer)?;
        let image = pixels.to_rgba_image().ok_or(CaptureError::Malformed)?;

        let mut encoded = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Bmp)?;

        std::fs::write(path, &encoded).map_err(|source| CaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("save_bmp: {}x{} -> {}", pixels.width, pixels.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ColorRgba, Rect};
    use crate::render::{HeadlessTarget, SoftRenderer, TextureHandle};

    fn renderer(w: u32, h: u32) -> SoftRenderer {
        SoftRenderer::new(Box::new(HeadlessTarget::new(w, h)))
    }

    /// Software renderer that reports padded readback rows.
    struct Padded(SoftRenderer);

    impl Renderer for Padded {
        fn set_clear_color(&mut self, color: ColorRgba) {
            self.0.set_clear_color(color)
        }
        fn begin_frame(&mut self) {
            self.0.begin_frame()
        }
        fn end_frame(&mut self) {
            self.0.end_frame()
        }
        fn draw_rect(&mut self, rect: Rect, color: ColorRgba) {
            self.0.draw_rect(rect, color)
        }
        fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorRgba) {
            self.0.draw_line(x1, y1, x2, y2, color)
        }
        fn set_clip_rect(&mut self, rect: Rect) {
            self.0.set_clip_rect(rect)
        }
        fn clear_clip_rect(&mut self) {
            self.0.clear_clip_rect()
        }
        fn drawable_size(&self) -> (u32, u32) {
            self.0.drawable_size()
        }
        fn create_texture_rgba(&mut self, w: u32, h: u32, px: Option<&[u8]>, pitch: usize) -> TextureHandle {
            self.0.create_texture_rgba(w, h, px, pitch)
        }
        fn draw_texture(&mut self, texture: TextureHandle, dst: Rect) {
            self.0.draw_texture(texture, dst)
        }
        fn destroy_texture(&mut self, texture: TextureHandle) {
            self.0.destroy_texture(texture)
        }
        fn read_pixels_argb8888(&mut self, dst: &mut [u8], pitch: usize, w: u32, h: u32) -> bool {
            self.0.read_pixels_argb8888(dst, pitch, w, h)
        }
        fn readback_pitch(&self, width: u32) -> usize {
            width as usize * 4 + 16
        }
    }

    #[test]
    fn empty_drawable_fails_both_modes() {
        let mut r = renderer(0, 0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.bmp");

        assert!(matches!(
            Capture.capture_argb8888(&mut r),
            Err(CaptureError::EmptyDrawable(0, 0))
        ));
        assert!(matches!(
            Capture.save_bmp(&mut r, &path),
            Err(CaptureError::EmptyDrawable(0, 0))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn capture_reads_drawn_pixels() {
        let mut r = renderer(4, 3);
        r.begin_frame();
        r.draw_rect(Rect::new(1, 1, 2, 1), ColorRgba::rgb(255, 0, 0));

        let buf = Capture.capture_argb8888(&mut r).unwrap();
        assert_eq!((buf.width, buf.height, buf.pitch), (4, 3, 16));
        assert_eq!(buf.bytes.len(), 48);
        assert_eq!(buf.pixel(0, 0), Some(0xFF00_0000));
        assert_eq!(buf.pixel(1, 1), Some(0xFFFF_0000));
        assert_eq!(buf.pixel(2, 1), Some(0xFFFF_0000));
        assert_eq!(buf.pixel(3, 1), Some(0xFF00_0000));
    }

    #[test]
    fn reported_pitch_is_kept() {
        let mut r = Padded(renderer(3, 2));
        r.set_clear_color(ColorRgba::white());
        r.begin_frame();

        let buf = Capture.capture_argb8888(&mut r).unwrap();
        assert_eq!(buf.pitch, 3 * 4 + 16);
        assert_eq!(buf.bytes.len(), buf.pitch * 2);
        assert_eq!(buf.pixel(2, 1), Some(0xFFFF_FFFF));
    }

    #[test]
    fn bmp_round_trips_through_decoder() {
        let mut r = Padded(renderer(5, 4));
        r.begin_frame();
        r.draw_rect(Rect::new(0, 0, 1, 1), ColorRgba::rgb(0, 255, 0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.bmp");
        Capture.save_bmp(&mut r, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Bmp)
            .unwrap()
            .to_rgba8();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(4, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn unwritable_path_reports_io() {
        let mut r = renderer(2, 2);
        r.begin_frame();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("shot.bmp");
        assert!(matches!(Capture.save_bmp(&mut r, &path), Err(CaptureError::Io { .. })));
    }
}
