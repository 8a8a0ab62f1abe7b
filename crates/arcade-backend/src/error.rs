use std::path::PathBuf;

use thiserror::Error;

use crate::audio::AudioError;
use crate::config::RenderApi;
use crate::text::FontLoadError;

/// Construction-time failure of the backend or one of its subsystems.
///
/// Each variant names the subsystem that failed; the payload carries the
/// underlying platform or library error text.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("platform initialization failed: {0}")]
    Platform(String),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("renderer initialization failed: {0}")]
    Renderer(String),

    #[error("render API `{0}` is not implemented")]
    UnsupportedRenderApi(RenderApi),

    #[error("text: {0}")]
    Font(#[from] FontLoadError),

    #[error("audio: {0}")]
    Audio(#[from] AudioError),
}

/// Failure while reading a [`BackendConfig`](crate::config::BackendConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
