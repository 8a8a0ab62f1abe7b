//! Backend configuration.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs the keys it
//! changes. The core consumes this configuration; it never writes it back.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coords::ColorRgba;
use crate::error::ConfigError;

/// Window geometry and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    pub title: String,
    pub resizable: bool,
    /// Render at the physical (backing) resolution instead of the logical one.
    pub high_dpi: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: String::new(),
            resizable: true,
            high_dpi: true,
        }
    }
}

/// Renderer implementation selector.
///
/// Closed set. Selecting a variant without an implementation fails backend
/// construction.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderApi {
    /// CPU rasterizer presented through a wgpu surface.
    #[default]
    Software,
    /// Native GPU drawing pipelines. Reserved.
    Gpu,
}

impl fmt::Display for RenderApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderApi::Software => f.write_str("software"),
            RenderApi::Gpu => f.write_str("gpu"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub api: RenderApi,
    pub clear_color: ColorRgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api: RenderApi::Software,
            clear_color: ColorRgba::black(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font loaded at startup. `None` (or an empty path) leaves text drawing a no-op
    /// until the caller loads a font.
    pub default_font_path: Option<PathBuf>,
    pub default_font_size: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            default_font_path: None,
            default_font_size: 24,
        }
    }
}

impl TextConfig {
    /// Returns the configured default font path, treating an empty path as unset.
    pub fn font_path(&self) -> Option<&Path> {
        self.default_font_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Sample rate in Hz.
    pub frequency: u32,
    pub channels: u16,
    /// Mixer buffer size in samples.
    pub chunk_size: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency: 44_100,
            channels: 2,
            chunk_size: 2048,
        }
    }
}

/// Top-level configuration consumed by [`Backend::new`](crate::Backend::new).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub text: TextConfig,
    pub audio: AudioConfig,

    /// Sounds preloaded at construction, keyed by sound id.
    pub sounds: BTreeMap<String, PathBuf>,
}

impl BackendConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = BackendConfig::default();
        assert_eq!((cfg.window.width, cfg.window.height), (1280, 720));
        assert!(cfg.window.resizable);
        assert!(cfg.window.high_dpi);
        assert_eq!(cfg.render.api, RenderApi::Software);
        assert_eq!(cfg.render.clear_color, ColorRgba::new(0, 0, 0, 255));
        assert_eq!(cfg.text.default_font_size, 24);
        assert!(cfg.text.font_path().is_none());
        assert!(!cfg.audio.enabled);
        assert_eq!(cfg.audio.frequency, 44_100);
        assert_eq!(cfg.audio.channels, 2);
        assert_eq!(cfg.audio.chunk_size, 2048);
        assert!(cfg.sounds.is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(BackendConfig::from_toml_str("").unwrap(), BackendConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = BackendConfig::from_toml_str(
            r#"
            [window]
            width = 800
            title = "breakout"

            [render]
            api = "gpu"
            clear_color = { r = 10, g = 20, b = 30, a = 255 }

            [sounds]
            bounce = "assets/bounce.wav"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.window.title, "breakout");
        assert_eq!(cfg.render.api, RenderApi::Gpu);
        assert_eq!(cfg.render.clear_color, ColorRgba::new(10, 20, 30, 255));
        assert_eq!(cfg.sounds.get("bounce"), Some(&PathBuf::from("assets/bounce.wav")));
    }

    #[test]
    fn empty_font_path_is_unset() {
        let cfg = BackendConfig::from_toml_str("[text]\ndefault_font_path = \"\"\n").unwrap();
        assert!(cfg.text.font_path().is_none());
    }

    #[test]
    fn unknown_render_api_is_rejected() {
        let err = BackendConfig::from_toml_str("[render]\napi = \"vulkan\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BackendConfig::load("does/not/exist.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, PathBuf::from("does/not/exist.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
