//! Frame recording on top of `vello_cpu`.
//!
//! Draw calls are recorded into a [`RenderContext`] and rasterized into the
//! [`Framebuffer`] only when someone needs the pixels (present or readback).
//! Callers hand in geometry that is already clipped to whole pixels, so every
//! fill is pixel-aligned and edges carry no anti-aliasing.

use std::sync::Arc;

use vello_cpu::kurbo::{self, Affine};
use vello_cpu::peniko::color::PremulRgba8;
use vello_cpu::peniko::{Color, ImageQuality, ImageSampler};
use vello_cpu::{Image, ImageSource, Pixmap, RenderContext};

use crate::coords::{ColorRgba, Rect};
use crate::render::target::{Framebuffer, premultiply};

/// Texture storage for the software renderer.
#[derive(Clone)]
pub struct SoftTexture {
    pub width: u32,
    pub height: u32,
    paint: Image,
}

impl SoftTexture {
    /// Copies straight-alpha `src` rows (`pitch` bytes apart) into a
    /// premultiplied pixmap.
    ///
    /// Returns `None` if `src` is too short for the given geometry or an edge
    /// does not fit a pixmap.
    pub fn from_rgba(width: u32, height: u32, src: &[u8], pitch: usize) -> Option<Self> {
        let (w, h) = (u16::try_from(width).ok()?, u16::try_from(height).ok()?);
        let row = width as usize * 4;
        if pitch < row {
            return None;
        }
        if height > 0 {
            let needed = pitch.checked_mul(height as usize - 1)?.checked_add(row)?;
            if src.len() < needed {
                return None;
            }
        }

        let mut may_have_opacities = false;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as usize {
            for px in src[y * pitch..y * pitch + row].chunks_exact(4) {
                may_have_opacities |= px[3] != 255;
                pixels.push(premultiply(px[0], px[1], px[2], px[3]));
            }
        }
        let pixmap = Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
        Some(Self::from_pixmap(pixmap))
    }

    /// Transparent texture.
    pub fn blank(width: u32, height: u32) -> Option<Self> {
        let (w, h) = (u16::try_from(width).ok()?, u16::try_from(height).ok()?);
        Some(Self::from_pixmap(Pixmap::new(w, h)))
    }

    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            paint: nearest_paint(pixmap),
        }
    }
}

/// Image paint sampled nearest-neighbour, the way textures are scaled.
pub(crate) fn nearest_paint(pixmap: Pixmap) -> Image {
    Image {
        image: ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: ImageSampler {
            quality: ImageQuality::Low,
            ..ImageSampler::default()
        },
    }
}

#[inline]
fn to_kurbo(r: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.right()),
        f64::from(r.bottom()),
    )
}

pub(crate) struct Canvas {
    // `None` while either edge is zero; there is nothing to draw into.
    ctx: Option<RenderContext>,
    frame: Framebuffer,
    // Commands were recorded since `frame` was last rasterized.
    stale: bool,
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let (w, h) = Framebuffer::clamp_size(width, height);
        Self {
            ctx: (w > 0 && h > 0).then(|| RenderContext::new(w, h)),
            frame: Framebuffer::new(width, height),
            stale: false,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    #[inline]
    pub(crate) fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::from_size(w, h)
    }

    fn fits(&self, width: u32, height: u32) -> bool {
        let (w, h) = Framebuffer::clamp_size(width, height);
        (u32::from(w), u32::from(h)) == self.size()
    }

    /// Drops everything recorded and starts over at `width x height`, filled
    /// with `color`.
    pub(crate) fn clear(&mut self, width: u32, height: u32, color: ColorRgba) {
        if self.fits(width, height) {
            if let Some(ctx) = self.ctx.as_mut() {
                ctx.reset();
            }
            self.frame.clear();
        } else {
            *self = Self::new(width, height);
        }
        self.stale = true;
        self.fill(self.bounds(), color);
    }

    /// Changes size while keeping what was drawn in the overlapping region.
    /// Newly exposed pixels are filled with `exposed`.
    pub(crate) fn resize(&mut self, width: u32, height: u32, exposed: ColorRgba) {
        if self.fits(width, height) {
            return;
        }

        let (ow, oh) = self.size();
        let snapshot = (ow > 0 && oh > 0).then(|| self.snapshot());
        *self = Self::new(width, height);
        let (w, h) = self.size();
        self.stale = true;

        if w > ow {
            self.fill(Rect::new(ow as i32, 0, (w - ow) as i32, h as i32), exposed);
        }
        if h > oh {
            let keep_w = ow.min(w);
            self.fill(Rect::new(0, oh as i32, keep_w as i32, (h - oh) as i32), exposed);
        }
        if let Some(old) = snapshot {
            let overlap = Rect::from_size(ow.min(w), oh.min(h));
            let full = Rect::from_size(ow, oh);
            self.draw_image(&old, (ow, oh), full, overlap);
        }
    }

    /// Current contents as an image paint.
    fn snapshot(&mut self) -> Image {
        let frame = self.render();
        let (w, h) = Framebuffer::clamp_size(frame.width(), frame.height());
        let pixels = frame
            .pixels()
            .chunks_exact(4)
            .map(|p| PremulRgba8 {
                r: p[0],
                g: p[1],
                b: p[2],
                a: p[3],
            })
            .collect();
        nearest_paint(Pixmap::from_parts_with_opacity(pixels, w, h, true))
    }

    /// Source-over fill of `area`, which must already be clipped.
    pub(crate) fn fill(&mut self, area: Rect, color: ColorRgba) {
        if color.a == 0 || area.is_empty() {
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint_transform(Affine::IDENTITY);
        ctx.set_paint(Color::from_rgba8(color.r, color.g, color.b, color.a));
        ctx.fill_rect(&to_kurbo(area));
        self.stale = true;
    }

    /// Stretches a `size` image over `dst`, painting only `visible`.
    pub(crate) fn draw_image(&mut self, paint: &Image, size: (u32, u32), dst: Rect, visible: Rect) {
        if size.0 == 0 || size.1 == 0 || visible.is_empty() {
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        let sx = f64::from(dst.w) / f64::from(size.0);
        let sy = f64::from(dst.h) / f64::from(size.1);
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint_transform(
            Affine::translate((f64::from(dst.x), f64::from(dst.y))) * Affine::scale_non_uniform(sx, sy),
        );
        ctx.set_paint(paint.clone());
        ctx.fill_rect(&to_kurbo(visible));
        self.stale = true;
    }

    pub(crate) fn draw_texture(&mut self, tex: &SoftTexture, dst: Rect, visible: Rect) {
        self.draw_image(&tex.paint, (tex.width, tex.height), dst, visible);
    }

    /// Rasterizes everything recorded so far.
    pub(crate) fn render(&mut self) -> &Framebuffer {
        if self.stale {
            if let Some(ctx) = self.ctx.as_mut() {
                self.frame.clear();
                ctx.flush();
                ctx.render_to_pixmap(self.frame.pixmap_mut());
            }
            self.stale = false;
        }
        &self.frame
    }
}
