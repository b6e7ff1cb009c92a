//! Descriptor defaults: metadata written into ext.json unless overridden on
//! the command line.

use serde::Deserialize;

/// Default descriptor metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorDefaults {
    /// Display name in the host application
    pub name: String,
    /// Reverse-domain identifier
    pub identifier: String,
    pub version: String,
    pub description: String,
    /// CDN base for standalone hosting
    pub cdn: Option<String>,
    /// Project homepage
    pub marketing_url: Option<String>,
    /// Mark the theme as light (default is dark)
    pub light: bool,
}

impl Default for DescriptorDefaults {
    fn default() -> Self {
        Self {
            name: "Emacs Org Mode".to_string(),
            identifier: "lt.sarunas.emacs-org-mode-theme".to_string(),
            version: "1.0.0".to_string(),
            description: "A dark theme inspired by Emacs Org Mode with Zenburn-like colors"
                .to_string(),
            cdn: None,
            marketing_url: None,
            light: false,
        }
    }
}

/// Descriptor settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDescriptor {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub cdn: Option<String>,
    pub marketing_url: Option<String>,
    pub light: Option<bool>,
}

impl DescriptorDefaults {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDescriptor>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            name: file.name.unwrap_or(defaults.name),
            identifier: file.identifier.unwrap_or(defaults.identifier),
            version: file.version.unwrap_or(defaults.version),
            description: file.description.unwrap_or(defaults.description),
            // Empty strings in the file mean "unset"
            cdn: file.cdn.filter(|s| !s.is_empty()),
            marketing_url: file.marketing_url.filter(|s| !s.is_empty()),
            light: file.light.unwrap_or(defaults.light),
        }
    }
}
