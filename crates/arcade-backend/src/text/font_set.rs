use super::FontLoadError;

/// Identifies a font loaded into a [`FontTextRenderer`](super::FontTextRenderer).
///
/// Ids are never reused, including after `unload_all`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FontId(pub(crate) usize);

impl FontId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

pub(crate) struct LoadedFont {
    pub(crate) font: fontdue::Font,
    /// Pixel size the font was loaded at.
    pub(crate) px: f32,
}

/// Fonts in load order, plus the current default.
#[derive(Default)]
pub(crate) struct FontSet {
    fonts: Vec<LoadedFont>,
    /// Id of `fonts[0]`; advances on `clear` so old ids stop resolving.
    base: usize,
    default: Option<FontId>,
}

impl FontSet {
    /// Parses `bytes` at `point_size` and stores the font.
    ///
    /// `origin` names the source in error messages.
    pub(crate) fn load(&mut self, bytes: &[u8], point_size: u32, origin: &str) -> Result<FontId, FontLoadError> {
        if point_size == 0 {
            return Err(FontLoadError::InvalidPointSize(point_size));
        }

        let px = point_size as f32;
        let settings = fontdue::FontSettings {
            scale: px,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|message| FontLoadError::Parse {
            origin: origin.to_owned(),
            message: message.to_owned(),
        })?;

        let id = FontId(self.base + self.fonts.len());
        self.fonts.push(LoadedFont { font, px });
        if self.default.is_none() {
            self.default = Some(id);
        }
        Ok(id)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&LoadedFont> {
        id.0.checked_sub(self.base).and_then(|i| self.fonts.get(i))
    }

    /// Resolves `None` to the default font.
    pub(crate) fn resolve(&self, id: Option<FontId>) -> Option<&LoadedFont> {
        id.or(self.default).and_then(|id| self.get(id))
    }

    pub(crate) fn default_font(&self) -> Option<FontId> {
        self.default
    }

    pub(crate) fn set_default(&mut self, id: FontId) {
        if self.get(id).is_some() {
            self.default = Some(id);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.fonts.len()
    }

    pub(crate) fn clear(&mut self) {
        self.base += self.fonts.len();
        self.fonts.clear();
        self.default = None;
    }
}
