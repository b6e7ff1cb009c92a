// Palette extraction from a reference HTML document
//
// Two passes over the document:
// - explicit `--sn-stylekit-*` / optional override declarations, line by line
// - palette slot detection from the `#RRGGBB` colors and first `font-family`
//
// A missing document is not an error: extraction comes back empty and the
// caller falls back to the built-in defaults.

use super::palette::{Palette, Slot};
use super::{palette, DockIcon, VariableMap, STYLEKIT_PREFIX};
use crate::error::{Result, ThemeError};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{6}").expect("hex color pattern is valid"));

static FONT_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)font-family:\s*([^;\n{}]+);").expect("font-family pattern is valid")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(--[A-Za-z0-9_-]+)\s*:\s*([^;{}]+?)\s*;").expect("declaration pattern is valid")
});

/// Result of scanning one HTML document
#[derive(Debug, Clone, Default)]
pub struct ExtractedPalette {
    /// Resolved palette: detected slots carry their preferred value, the rest fall back
    pub palette: Palette,
    /// Slots found in the document
    detected: BTreeSet<Slot>,
    /// Recognized custom-property declarations, verbatim
    declarations: VariableMap,
}

impl ExtractedPalette {
    /// Scan HTML text
    pub fn from_html(html: &str) -> Self {
        let colors: HashSet<String> = HEX_COLOR
            .find_iter(html)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut palette = Palette::default();
        let mut detected = BTreeSet::new();

        if let Some(font) = FONT_FAMILY
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|font| !font.is_empty())
        {
            palette.set(Slot::FontFamily, font);
            detected.insert(Slot::FontFamily);
        }

        for slot in Slot::ALL {
            let Some(preferred) = slot.preferred() else {
                continue;
            };
            if colors.contains(preferred) {
                palette.set(slot, preferred);
                detected.insert(slot);
            }
        }

        Self {
            palette,
            detected,
            declarations: Self::scan_declarations(html),
        }
    }

    /// Collect recognized custom-property declarations line by line.
    /// A later declaration of the same name replaces an earlier one.
    fn scan_declarations(html: &str) -> VariableMap {
        let mut declarations = VariableMap::new();
        for line in html.lines() {
            for caps in DECLARATION.captures_iter(line) {
                let name = &caps[1];
                if name.starts_with(STYLEKIT_PREFIX) || palette::is_optional_override(name) {
                    declarations.insert(name, caps[2].trim());
                }
            }
        }
        declarations
    }

    /// True when nothing in the document matched
    pub fn is_empty(&self) -> bool {
        self.detected.is_empty() && self.declarations.is_empty()
    }

    #[cfg(test)]
    pub fn detected_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.detected.iter().copied()
    }

    /// Variables this document contributes: everything derived from a
    /// detected slot, then explicit declarations on top
    pub fn variables(&self) -> VariableMap {
        let mut vars = self.palette.variables_where(|_, source| {
            source
                .slot()
                .is_some_and(|slot| self.detected.contains(&slot))
        });
        vars.overlay(&self.declarations);
        vars
    }

    /// Trailing rule keeping plain anchors in the link color
    pub fn anchor_rule(&self) -> String {
        format!("a {{ color: {}; }}", self.palette.get(Slot::Link))
    }

    pub fn dock_icon(&self) -> DockIcon {
        DockIcon::circle(
            self.palette.get(Slot::Background),
            self.palette.get(Slot::Accent),
            self.palette.get(Slot::Info),
        )
    }
}

/// Extract from a file on disk.
///
/// A missing file logs a warning and returns an empty extraction; any other
/// read failure is a filesystem error.
pub fn extract_from_file(path: &Path) -> Result<ExtractedPalette> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "Palette source {} not found, using built-in defaults",
                path.display()
            );
            return Ok(ExtractedPalette::default());
        }
        Err(e) => return Err(ThemeError::filesystem(path, e)),
    };

    let html = String::from_utf8_lossy(&bytes);
    let extracted = ExtractedPalette::from_html(&html);

    if extracted.is_empty() {
        tracing::warn!(
            "No palette colors or StyleKit declarations found in {}",
            path.display()
        );
    } else {
        tracing::info!(
            "Extracted {} palette slot(s) and {} declaration(s) from {}",
            extracted.detected.len(),
            extracted.declarations.len(),
            path.display()
        );
    }

    Ok(extracted)
}
