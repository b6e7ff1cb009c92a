// Output module - writes rendered artifacts into the output directory
//
// Both files are staged as temporary files inside the output directory first
// and only persisted once both were written completely, so a failed run does
// not leave a fresh theme.css next to a stale ext.json.
//
// Layout:
//   <out>/theme.css
//   <out>/ext.json

use crate::error::{Result, ThemeError};
use crate::theme::{RenderedTheme, CSS_FILENAME, EXT_FILENAME};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Paths of the files written by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub css: PathBuf,
    pub ext_json: PathBuf,
}

/// An output directory that exists on disk
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create the directory (and parents) if it doesn't exist
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ThemeError::filesystem(&root, e))?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn css_path(&self) -> PathBuf {
        self.root.join(CSS_FILENAME)
    }

    pub fn ext_json_path(&self) -> PathBuf {
        self.root.join(EXT_FILENAME)
    }

    /// Write both artifacts, overwriting existing files
    pub fn write_theme(&self, rendered: &RenderedTheme) -> Result<WrittenFiles> {
        let css_target = self.css_path();
        let ext_target = self.ext_json_path();

        // Stage both before touching either target.
        // Dropped NamedTempFiles delete themselves on the error paths.
        let css_staged = self.stage(&css_target, &rendered.css)?;
        let ext_staged = self.stage(&ext_target, &rendered.ext_json)?;

        Self::persist(css_staged, &css_target)?;
        Self::persist(ext_staged, &ext_target)?;

        tracing::debug!("Wrote {} and {}", css_target.display(), ext_target.display());

        Ok(WrittenFiles {
            css: css_target,
            ext_json: ext_target,
        })
    }

    /// Write `contents` to a temporary file next to `target`.
    /// A directory in the way fails here rather than at persist time.
    fn stage(&self, target: &Path, contents: &str) -> Result<NamedTempFile> {
        if target.is_dir() {
            return Err(ThemeError::filesystem(
                target,
                std::io::Error::other("a directory is in the way"),
            ));
        }

        let mut staged =
            NamedTempFile::new_in(&self.root).map_err(|e| ThemeError::filesystem(target, e))?;

        staged
            .write_all(contents.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(|e| ThemeError::filesystem(target, e))?;

        Ok(staged)
    }

    fn persist(staged: NamedTempFile, target: &Path) -> Result<()> {
        staged
            .persist(target)
            .map_err(|e| ThemeError::filesystem(target, e.error))?;
        Ok(())
    }
}
