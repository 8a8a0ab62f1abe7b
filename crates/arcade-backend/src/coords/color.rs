use serde::{Deserialize, Serialize};

/// 8-bit RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Packs into `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks from `0xAARRGGBB`.
    #[inline]
    pub const fn from_argb(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
    }

    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing() {
        let c = ColorRgba::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_argb(), 0x4411_2233);
        assert_eq!(ColorRgba::from_argb(0x4411_2233), c);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(ColorRgba::rgb(1, 2, 3).a, 255);
        assert_eq!(ColorRgba::black().with_alpha(7), ColorRgba::new(0, 0, 0, 7));
    }
}
