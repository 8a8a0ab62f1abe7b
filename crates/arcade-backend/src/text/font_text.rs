use std::collections::HashMap;
use std::path::Path;

use fontdue::layout::GlyphRasterConfig;

use vello_cpu::kurbo::{self, Affine};
use vello_cpu::{Pixmap, RenderContext};

use crate::coords::{ColorRgba, Rect};
use crate::render::Renderer;
use crate::render::soft::nearest_paint;
use crate::render::target::{Framebuffer, premultiply, unpremultiply};

use super::font_set::{FontSet, LoadedFont};
use super::layout::{self, RunLayout};
use super::{FontId, FontLoadError, TextRenderer};

/// Cached coverage maps beyond this count are dropped wholesale.
const GLYPH_CACHE_LIMIT: usize = 4096;

/// [`TextRenderer`] backed by fontdue.
#[derive(Default)]
pub struct FontTextRenderer {
    fonts: FontSet,
    /// Coverage bitmaps keyed by (font, glyph, size).
    glyph_cache: HashMap<GlyphRasterConfig, Vec<u8>>,
}

impl FontTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizes `run` into a tightly packed straight-alpha RGBA8 bitmap.
    ///
    /// Each glyph becomes an image paint of its coverage in `color`; overlapping
    /// glyphs composite source-over.
    fn render_run(&mut self, font: Option<FontId>, run: &RunLayout, color: ColorRgba) -> Vec<u8> {
        let (w, h) = Framebuffer::clamp_size(run.width, run.height);
        let mut bitmap = vec![0u8; usize::from(w) * usize::from(h) * 4];

        let Some(loaded) = self.fonts.resolve(font) else {
            return bitmap;
        };
        if w == 0 || h == 0 || color.a == 0 {
            return bitmap;
        }

        let bounds = Rect::from_size(u32::from(w), u32::from(h));
        let mut ctx = RenderContext::new(w, h);
        for g in &run.glyphs {
            let dst = Rect::new(g.x, g.y, g.width as i32, g.height as i32);
            let Some(visible) = dst.intersect(bounds) else {
                continue;
            };
            let (Ok(gw), Ok(gh)) = (u16::try_from(g.width), u16::try_from(g.height)) else {
                continue;
            };

            let coverage = glyph_coverage(&mut self.glyph_cache, loaded, g.key);
            let pixels = (0..g.width * g.height)
                .map(|i| {
                    let cov = u32::from(coverage.get(i).copied().unwrap_or(0));
                    let a = ((cov * u32::from(color.a) + 127) / 255) as u8;
                    premultiply(color.r, color.g, color.b, a)
                })
                .collect();
            let glyph = nearest_paint(Pixmap::from_parts_with_opacity(pixels, gw, gh, true));

            ctx.set_paint_transform(Affine::translate((f64::from(g.x), f64::from(g.y))));
            ctx.set_paint(glyph);
            ctx.fill_rect(&kurbo::Rect::new(
                f64::from(visible.x),
                f64::from(visible.y),
                f64::from(visible.right()),
                f64::from(visible.bottom()),
            ));
        }

        let mut out = Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut out);
        for (src, dst) in out.data_as_u8_slice().chunks_exact(4).zip(bitmap.chunks_exact_mut(4)) {
            dst.copy_from_slice(&unpremultiply([src[0], src[1], src[2], src[3]]).to_rgba_bytes());
        }
        bitmap
    }
}

fn glyph_coverage<'c>(
    cache: &'c mut HashMap<GlyphRasterConfig, Vec<u8>>,
    loaded: &LoadedFont,
    key: GlyphRasterConfig,
) -> &'c [u8] {
    if cache.len() >= GLYPH_CACHE_LIMIT && !cache.contains_key(&key) {
        cache.clear();
    }
    cache
        .entry(key)
        .or_insert_with(|| loaded.font.rasterize_config(key).1)
}

impl TextRenderer for FontTextRenderer {
    fn load_font(&mut self, path: &Path, point_size: u32) -> Result<FontId, FontLoadError> {
        if path.as_os_str().is_empty() {
            return Err(FontLoadError::EmptyPath);
        }
        if point_size == 0 {
            return Err(FontLoadError::InvalidPointSize(point_size));
        }

        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = self.fonts.load(&bytes, point_size, &path.display().to_string())?;

        log::info!("load_font: {} at {point_size}pt -> {id:?}", path.display());
        Ok(id)
    }

    fn load_font_bytes(&mut self, bytes: &[u8], point_size: u32) -> Result<FontId, FontLoadError> {
        self.fonts.load(bytes, point_size, "<memory>")
    }

    fn measure_utf8(&self, text: &str, font: Option<FontId>) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }
        match self.fonts.resolve(font) {
            Some(loaded) => {
                let run = layout::layout_run(&loaded.font, text, loaded.px);
                (run.width, run.height)
            }
            None => (0, 0),
        }
    }

    fn draw_utf8(
        &mut self,
        renderer: &mut dyn Renderer,
        text: &str,
        x: i32,
        y: i32,
        color: ColorRgba,
        font: Option<FontId>,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(loaded) = self.fonts.resolve(font) else {
            return;
        };

        let run = layout::layout_run(&loaded.font, text, loaded.px);
        let bitmap = self.render_run(font, &run, color);

        let pitch = run.width as usize * 4;
        let texture = renderer.create_texture_rgba(run.width, run.height, Some(&bitmap), pitch);
        if !texture.is_valid() {
            return;
        }

        renderer.draw_texture(
            texture,
            Rect::new(x, y, run.width as i32, run.height as i32),
        );
        renderer.destroy_texture(texture);
    }

    fn default_font(&self) -> Option<FontId> {
        self.fonts.default_font()
    }

    fn set_default_font(&mut self, font: FontId) {
        self.fonts.set_default(font);
    }

    fn font_count(&self) -> usize {
        self.fonts.len()
    }

    fn unload_all(&mut self) {
        let n = self.fonts.len();
        self.fonts.clear();
        self.glyph_cache.clear();
        if n > 0 {
            log::debug!("unload_all: released {n} fonts");
        }
    }
}
