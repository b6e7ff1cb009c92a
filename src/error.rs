//! Error kinds surfaced by theme generation and serving

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that terminate a run
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Malformed override, malformed variable file, bad config, missing arguments
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Output directory or file could not be created/written, or input unreadable
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Static server could not bind or stopped with an I/O failure
    #[error("server error on {addr}: {source}")]
    Server {
        addr: String,
        #[source]
        source: io::Error,
    },
}

impl ThemeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn filesystem(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn server(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Server {
            addr: addr.into(),
            source,
        }
    }
}

/// Result alias used across the crate
pub type Result<T, E = ThemeError> = std::result::Result<T, E>;
