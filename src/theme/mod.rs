// Theme module - StyleKit variable model and the generation stages
//
// Stages, leaves first:
// - palette: palette slots and the built-in StyleKit variable tables
// - extract: pulls a palette and explicit declarations out of an HTML file
// - resolve: layers defaults, variable file, palette and --set overrides
// - render: turns the resolved map and descriptor into theme.css / ext.json

pub mod extract;
pub mod palette;
pub mod render;
pub mod resolve;

pub use extract::ExtractedPalette;
pub use render::{DockIcon, RenderedTheme, ThemeDescriptor, CSS_FILENAME, EXT_FILENAME};
pub use resolve::VariableSources;

use std::collections::BTreeMap;

/// Prefix shared by every variable the host's theming engine requires.
/// Anything without it is an optional override.
pub const STYLEKIT_PREFIX: &str = "--sn-stylekit-";

/// Returns true for optional override variables (not part of StyleKit proper)
pub fn is_non_essential(name: &str) -> bool {
    !name.starts_with(STYLEKIT_PREFIX)
}

/// Mapping from CSS custom-property name to value.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// order is the byte order of the keys, rendering uses [`VariableMap::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    entries: BTreeMap<String, String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lay `other` on top of this map: its keys win, keys it lacks are kept
    pub fn overlay(&mut self, other: &VariableMap) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Drop every optional override variable
    pub fn without_non_essential(mut self) -> Self {
        self.entries.retain(|name, _| !is_non_essential(name));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries in rendering order: case-insensitive by name, ties by exact name
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
