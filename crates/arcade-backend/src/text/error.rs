use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("font path is empty")]
    EmptyPath,

    #[error("invalid point size {0}")]
    InvalidPointSize(u32),

    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {origin}: {message}")]
    Parse { origin: String, message: String },
}
