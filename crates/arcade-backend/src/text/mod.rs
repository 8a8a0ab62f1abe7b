//! Text layer.
//!
//! Rasterizes UTF-8 runs on the CPU and draws them through the [`Renderer`]
//! interface only: every draw uploads one temporary texture, draws it and
//! destroys it. No texture outlives the call.
//!
//! Point sizes map 1:1 to pixels.

mod error;
mod font_set;
mod font_text;
mod layout;

pub use error::FontLoadError;
pub use font_set::FontId;
pub use font_text::FontTextRenderer;

use std::path::Path;

use crate::coords::ColorRgba;
use crate::render::Renderer;

/// Font management, measurement and drawing.
///
/// `font: None` means "the default font". Operations on an unresolved font or
/// on empty text are no-ops (measurement returns `(0, 0)`).
pub trait TextRenderer {
    /// Loads a font file. The first font loaded becomes the default unless one is set.
    fn load_font(&mut self, path: &Path, point_size: u32) -> Result<FontId, FontLoadError>;

    /// Loads a font from memory. Same defaulting rule as [`load_font`](Self::load_font).
    fn load_font_bytes(&mut self, bytes: &[u8], point_size: u32) -> Result<FontId, FontLoadError>;

    /// Pixel size of `text` as [`draw_utf8`](Self::draw_utf8) would draw it.
    ///
    /// Both edges are capped at
    /// [`MAX_TEXTURE_DIMENSION`](crate::render::MAX_TEXTURE_DIMENSION); a
    /// longer run is drawn cut off at that edge.
    fn measure_utf8(&self, text: &str, font: Option<FontId>) -> (u32, u32);

    /// Draws `text` with its top-left corner at `(x, y)` in drawable pixels.
    fn draw_utf8(
        &mut self,
        renderer: &mut dyn Renderer,
        text: &str,
        x: i32,
        y: i32,
        color: ColorRgba,
        font: Option<FontId>,
    );

    fn default_font(&self) -> Option<FontId>;

    /// Makes `font` the default. Unknown ids are ignored.
    fn set_default_font(&mut self, font: FontId);

    fn font_count(&self) -> usize;

    /// Drops every font and clears the default.
    fn unload_all(&mut self);
}
