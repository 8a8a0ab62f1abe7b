use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::MAX_TEXTURE_DIMENSION;

/// One glyph bitmap placed relative to the run's top-left corner.
#[derive(Debug, Clone)]
pub(crate) struct PlacedGlyph {
    pub(crate) key: GlyphRasterConfig,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

/// A laid-out single-style run and its pixel extent.
#[derive(Debug, Clone)]
pub(crate) struct RunLayout {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) glyphs: Vec<PlacedGlyph>,
}

/// Lays `text` out at `px`. Measurement and drawing both go through here.
///
/// Width is the furthest of pen advance and bitmap edge over all glyphs; height is
/// the larger of the line box and the lowest bitmap edge. Non-empty text always
/// measures at least 1x1 and at most [`MAX_TEXTURE_DIMENSION`] on either edge;
/// glyphs past that edge are cut off when drawn.
pub(crate) fn layout_run(font: &fontdue::Font, text: &str, px: f32) -> RunLayout {
    if text.is_empty() {
        return RunLayout {
            width: 0,
            height: 0,
            glyphs: Vec::new(),
        };
    }

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let mut right = 0.0f32;
    let mut bottom = layout.height();
    let mut glyphs = Vec::with_capacity(layout.glyphs().len());

    for g in layout.glyphs() {
        let m = font.metrics_indexed(g.key.glyph_index, px);
        // Pen position after the glyph, so trailing spaces count.
        right = right
            .max(g.x - m.xmin as f32 + m.advance_width)
            .max(g.x + g.width as f32);
        bottom = bottom.max(g.y + g.height as f32);

        if g.width > 0 && g.height > 0 {
            glyphs.push(PlacedGlyph {
                key: g.key,
                x: g.x.round() as i32,
                y: g.y.round() as i32,
                width: g.width,
                height: g.height,
            });
        }
    }

    RunLayout {
        width: (right.ceil() as u32).clamp(1, MAX_TEXTURE_DIMENSION),
        height: (bottom.ceil() as u32).clamp(1, MAX_TEXTURE_DIMENSION),
        glyphs,
    }
}
