//! Configuration for theme generation and the local server
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by the CLI layer)
//! 2. Environment variables
//! 3. Config file (~/.config/sn-theme/config.toml or --config)
//! 4. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod descriptor;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use descriptor::{DescriptorDefaults, FileDescriptor};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_OUT_DIR: &str = "dist";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8001;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory receiving theme.css and ext.json
    pub out_dir: PathBuf,

    /// Host the local server binds to (and that import hints point at)
    pub host: String,

    /// Port the local server binds to
    pub port: u16,

    /// Default descriptor metadata
    pub descriptor: DescriptorDefaults,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Config file these values were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            descriptor: DescriptorDefaults::default(),
            logging: LoggingConfig::default(),
            source: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub out: Option<String>,

    /// Optional [descriptor] section
    pub descriptor: Option<FileDescriptor>,

    /// Optional [server] section
    pub server: Option<FileServer>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Server settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileServer {
    pub host: Option<String>,
    pub port: Option<u16>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the default config file path: ~/.config/sn-theme/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("sn-theme").join("config.toml"))
    }

    /// Parse a config file body
    pub(crate) fn parse_file_config(contents: &str, origin: &Path) -> Result<FileConfig> {
        toml::from_str(contents).map_err(|e| {
            ThemeError::config(format!("failed to parse {}: {}", origin.display(), e))
        })
    }

    /// Read the config file.
    ///
    /// An explicit path must exist; the default path may be absent, in which
    /// case built-in defaults apply. A file that exists but is broken is
    /// always an error.
    fn load_file_config(explicit: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => return Ok((FileConfig::default(), None)),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let file = Self::parse_file_config(&contents, &path)?;
                Ok((file, Some(path)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                // No config file - use defaults
                Ok((FileConfig::default(), None))
            }
            Err(e) => Err(ThemeError::config(format!(
                "cannot read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (file, source) = Self::load_file_config(explicit)?;
        let mut config = Self::from_sources(file, |key| std::env::var(key).ok())?;
        config.source = source;
        Ok(config)
    }

    /// Combine a parsed file with an environment lookup
    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let server = file.server.unwrap_or_default();

        // Output directory: env > file > default
        let out_dir = env("SN_THEME_OUT")
            .or(file.out)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

        // Host: env > file > default
        let host = env("SN_THEME_HOST")
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        // Port: env > file > default; a bad env value is an error, not a fallback
        let port = match env("SN_THEME_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ThemeError::config(format!("SN_THEME_PORT is not a valid port: {}", raw))
            })?,
            None => server.port.unwrap_or(DEFAULT_PORT),
        };

        let mut descriptor = DescriptorDefaults::from_file(file.descriptor);
        // CDN base: env > file
        if let Some(cdn) = env("SN_THEME_CDN").filter(|c| !c.is_empty()) {
            descriptor.cdn = Some(cdn);
        }

        let mut logging = LoggingConfig::from_file(file.logging);
        // Log level: env > file (RUST_LOG still overrides the whole filter)
        if let Some(level) = env("SN_THEME_LOG") {
            logging.level = level;
        }

        Ok(Self {
            out_dir,
            host,
            port,
            descriptor,
            logging,
            source: None,
        })
    }

    /// Write the default template if no config file exists yet.
    /// Returns true if a file was written.
    pub fn init_template(path: &Path) -> Result<bool> {
        // Don't overwrite existing config
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ThemeError::filesystem(parent, e))?;
        }

        // Use Config::default().to_toml() as single source of truth
        std::fs::write(path, Self::default().to_toml())
            .map_err(|e| ThemeError::filesystem(path, e))?;
        Ok(true)
    }
}
