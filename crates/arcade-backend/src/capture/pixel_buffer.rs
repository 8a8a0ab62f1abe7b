/// ARGB8888 pixels read back from a renderer.
///
/// Each pixel is a native-endian `u32` `0xAARRGGBB`. Rows are `pitch` bytes apart
/// and `pitch` is kept exactly as the renderer reported it, padding included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
    pub bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Pixel bytes of row `y`, without padding.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.pitch;
        self.bytes.get(start..start + self.width as usize * 4)
    }

    /// Packed `0xAARRGGBB` at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let i = x as usize * 4;
        Some(u32::from_ne_bytes([row[i], row[i + 1], row[i + 2], row[i + 3]]))
    }

    /// Repacks into a tightly packed RGBA8 image.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for px in self.row(y)?.chunks_exact(4) {
                let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                rgba.extend_from_slice(&[
                    (argb >> 16) as u8,
                    (argb >> 8) as u8,
                    argb as u8,
                    (argb >> 24) as u8,
                ]);
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, rgba)
    }
}
