// Palette slots and the StyleKit variable tables
//
// A palette is 19 named slots (one font, eighteen colors). Each StyleKit
// variable is derived from exactly one slot, an alpha variant of a slot, or a
// literal. The built-in defaults are these tables evaluated on the fallback
// palette.

use super::VariableMap;
use std::collections::BTreeMap;

/// Named palette slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    FontFamily,
    Background,
    EditorBackground,
    PanelBackground,
    SelectionBackground,
    StatusBackground,
    HeaderBackground,
    DimBorder,
    Border,
    Success,
    Info,
    Comment,
    Accent,
    Link,
    Muted,
    Danger,
    Foreground,
    LightForeground,
    Warning,
}

impl Slot {
    pub const ALL: [Slot; 19] = [
        Slot::FontFamily,
        Slot::Background,
        Slot::EditorBackground,
        Slot::PanelBackground,
        Slot::SelectionBackground,
        Slot::StatusBackground,
        Slot::HeaderBackground,
        Slot::DimBorder,
        Slot::Border,
        Slot::Success,
        Slot::Info,
        Slot::Comment,
        Slot::Accent,
        Slot::Link,
        Slot::Muted,
        Slot::Danger,
        Slot::Foreground,
        Slot::LightForeground,
        Slot::Warning,
    ];

    /// Color that marks this slot as present in a reference document.
    /// `None` for the font slot, which is detected from `font-family`.
    pub fn preferred(self) -> Option<&'static str> {
        let color = match self {
            Slot::FontFamily => return None,
            Slot::Background => "#1c1c1c",
            Slot::EditorBackground => "#282828",
            Slot::PanelBackground => "#2a2a2a",
            Slot::SelectionBackground => "#2f2f2f",
            Slot::StatusBackground => "#343434",
            Slot::HeaderBackground => "#383838",
            Slot::DimBorder => "#505050",
            Slot::Border => "#696969",
            Slot::Success => "#6fb86f",
            Slot::Info => "#7cb8bb",
            Slot::Comment => "#7f9f7f",
            Slot::Accent => "#8cd0d3",
            Slot::Link => "#93e0e3",
            Slot::Muted => "#c0c0c0",
            Slot::Danger => "#cc9393",
            Slot::Foreground => "#d0d0d0",
            Slot::LightForeground => "#dcdccc",
            Slot::Warning => "#f0dfaf",
        };
        Some(color)
    }

    /// Value used when the slot is not detected
    pub fn fallback(self) -> &'static str {
        match self {
            Slot::FontFamily => "'Courier New', monospace",
            Slot::Background => "#1c1c1c",
            Slot::EditorBackground => "#282828",
            Slot::PanelBackground => "#2a2a2a",
            Slot::SelectionBackground => "#2f2f2f",
            Slot::StatusBackground => "#343434",
            Slot::HeaderBackground => "#383838",
            Slot::DimBorder => "#505050",
            Slot::Border => "#696969",
            Slot::Success => "#2b9612",
            Slot::Info => "#086dd6",
            Slot::Comment => "#989898",
            Slot::Accent => "#7049cf",
            Slot::Link => "#086dd6",
            Slot::Muted => "#989898",
            Slot::Danger => "#f80324",
            Slot::Foreground => "#d0d0d0",
            Slot::LightForeground => "#ffffff",
            Slot::Warning => "#f6a200",
        }
    }
}

/// How a variable's value is obtained from a palette
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// The slot value verbatim
    Slot(Slot),
    /// The slot color with an alpha suffix appended (`#rrggbb` + `aa`)
    Alpha(Slot, &'static str),
    /// A fixed value independent of the palette
    Literal(&'static str),
}

impl Source {
    /// Slot this source reads, if any
    pub fn slot(self) -> Option<Slot> {
        match self {
            Source::Slot(slot) | Source::Alpha(slot, _) => Some(slot),
            Source::Literal(_) => None,
        }
    }

    fn evaluate(self, palette: &Palette) -> String {
        match self {
            Source::Slot(slot) => palette.get(slot).to_string(),
            Source::Alpha(slot, alpha) => format!("{}{}", palette.get(slot), alpha),
            Source::Literal(value) => value.to_string(),
        }
    }
}

use Slot::*;

/// StyleKit variables consumed by the host's theming engine
pub const STYLEKIT_VARIABLES: &[(&str, Source)] = &[
    // Font
    ("--sn-stylekit-monospace-font", Source::Slot(FontFamily)),
    ("--sn-stylekit-sans-serif-font", Source::Slot(FontFamily)),
    // Core colors
    ("--sn-stylekit-background-color", Source::Slot(Background)),
    ("--sn-stylekit-foreground-color", Source::Slot(Foreground)),
    ("--sn-stylekit-border-color", Source::Slot(Border)),
    ("--sn-stylekit-contrast-background-color", Source::Slot(EditorBackground)),
    ("--sn-stylekit-contrast-foreground-color", Source::Slot(Muted)),
    ("--sn-stylekit-contrast-border-color", Source::Slot(Border)),
    ("--sn-stylekit-secondary-background-color", Source::Slot(PanelBackground)),
    ("--sn-stylekit-secondary-foreground-color", Source::Slot(Foreground)),
    ("--sn-stylekit-secondary-border-color", Source::Slot(Border)),
    ("--sn-stylekit-secondary-contrast-background-color", Source::Slot(HeaderBackground)),
    ("--sn-stylekit-secondary-contrast-foreground-color", Source::Slot(Foreground)),
    ("--sn-stylekit-secondary-contrast-border-color", Source::Slot(Border)),
    // Editor
    ("--sn-stylekit-editor-background-color", Source::Slot(EditorBackground)),
    ("--sn-stylekit-editor-foreground-color", Source::Slot(Foreground)),
    // Semantic colors
    ("--sn-stylekit-neutral-color", Source::Slot(Muted)),
    ("--sn-stylekit-neutral-contrast-color", Source::Slot(Background)),
    ("--sn-stylekit-info-color", Source::Slot(Info)),
    ("--sn-stylekit-info-contrast-color", Source::Slot(Background)),
    ("--sn-stylekit-success-color", Source::Slot(Success)),
    ("--sn-stylekit-success-contrast-color", Source::Slot(Background)),
    ("--sn-stylekit-warning-color", Source::Slot(Warning)),
    ("--sn-stylekit-warning-contrast-color", Source::Slot(Background)),
    ("--sn-stylekit-danger-color", Source::Slot(Danger)),
    ("--sn-stylekit-danger-contrast-color", Source::Slot(Background)),
    // Misc UI tokens
    ("--sn-stylekit-shadow-color", Source::Slot(DimBorder)),
    ("--sn-stylekit-paragraph-text-color", Source::Slot(Foreground)),
    ("--sn-stylekit-input-placeholder-color", Source::Slot(Comment)),
    ("--sn-stylekit-input-border-color", Source::Slot(Border)),
    ("--sn-stylekit-scrollbar-thumb-color", Source::Slot(DimBorder)),
    ("--sn-stylekit-scrollbar-track-border-color", Source::Slot(Border)),
    ("--sn-stylekit-general-border-radius", Source::Literal("2px")),
    // Greyscale ramp
    ("--sn-stylekit-grey-1", Source::Slot(DimBorder)),
    ("--sn-stylekit-grey-2", Source::Slot(Border)),
    ("--sn-stylekit-grey-3", Source::Slot(SelectionBackground)),
    ("--sn-stylekit-grey-4", Source::Slot(StatusBackground)),
    ("--sn-stylekit-grey-4-opacity-variant", Source::Alpha(StatusBackground, "80")),
    ("--sn-stylekit-grey-5", Source::Slot(HeaderBackground)),
    ("--sn-stylekit-grey-6", Source::Slot(EditorBackground)),
    // Accessory tints
    ("--sn-stylekit-accessory-tint-color-1", Source::Slot(Info)),
    ("--sn-stylekit-accessory-tint-color-2", Source::Slot(Danger)),
    ("--sn-stylekit-accessory-tint-color-3", Source::Slot(Warning)),
    ("--sn-stylekit-accessory-tint-color-4", Source::Slot(Accent)),
    ("--sn-stylekit-accessory-tint-color-5", Source::Slot(Success)),
    ("--sn-stylekit-accessory-tint-color-6", Source::Slot(Link)),
];

/// Optional override variables for individual UI regions
pub const OPTIONAL_OVERRIDES: &[(&str, Source)] = &[
    ("--modal-background-color", Source::Literal("var(--sn-stylekit-background-color)")),
    ("--editor-header-bar-background-color", Source::Slot(HeaderBackground)),
    ("--editor-background-color", Source::Literal("var(--sn-stylekit-editor-background-color)")),
    ("--editor-foreground-color", Source::Literal("var(--sn-stylekit-editor-foreground-color)")),
    ("--editor-title-bar-border-bottom-color", Source::Literal("var(--sn-stylekit-border-color)")),
    ("--editor-title-input-color", Source::Literal("var(--sn-stylekit-editor-foreground-color)")),
    ("--editor-pane-background-color", Source::Literal("var(--sn-stylekit-background-color)")),
    (
        "--editor-pane-editor-background-color",
        Source::Literal("var(--sn-stylekit-editor-background-color)"),
    ),
    (
        "--editor-pane-editor-foreground-color",
        Source::Literal("var(--sn-stylekit-editor-foreground-color)"),
    ),
    (
        "--editor-pane-component-stack-item-background-color",
        Source::Literal("var(--sn-stylekit-background-color)"),
    ),
    ("--text-selection-color", Source::Literal("var(--sn-stylekit-info-contrast-color)")),
    ("--text-selection-background-color", Source::Literal("var(--sn-stylekit-info-color)")),
    ("--items-column-background-color", Source::Literal("var(--sn-stylekit-background-color)")),
    (
        "--items-column-items-background-color",
        Source::Literal("var(--sn-stylekit-background-color)"),
    ),
    ("--items-column-border-left-color", Source::Literal("var(--sn-stylekit-border-color)")),
    ("--items-column-border-right-color", Source::Literal("var(--sn-stylekit-border-color)")),
    (
        "--items-column-search-background-color",
        Source::Literal("var(--sn-stylekit-contrast-background-color)"),
    ),
    (
        "--item-cell-selected-background-color",
        Source::Literal("var(--sn-stylekit-contrast-background-color)"),
    ),
    ("--item-cell-selected-border-left-color", Source::Literal("var(--sn-stylekit-info-color)")),
    (
        "--navigation-column-background-color",
        Source::Literal("var(--sn-stylekit-secondary-background-color)"),
    ),
    (
        "--navigation-section-title-color",
        Source::Literal("var(--sn-stylekit-secondary-foreground-color)"),
    ),
    (
        "--navigation-item-text-color",
        Source::Literal("var(--sn-stylekit-secondary-foreground-color)"),
    ),
    ("--navigation-item-count-color", Source::Literal("var(--sn-stylekit-neutral-color)")),
    (
        "--panel-resizer-background-color",
        Source::Literal("var(--sn-stylekit-secondary-contrast-background-color)"),
    ),
    ("--link-element-color", Source::Slot(Link)),
];

/// Every variable table entry, StyleKit first
pub fn all_variables() -> impl Iterator<Item = &'static (&'static str, Source)> {
    STYLEKIT_VARIABLES.iter().chain(OPTIONAL_OVERRIDES.iter())
}

/// Is `name` one of the known optional override variables?
pub fn is_optional_override(name: &str) -> bool {
    OPTIONAL_OVERRIDES.iter().any(|(known, _)| *known == name)
}

/// A fully resolved palette: every slot has a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    values: BTreeMap<Slot, String>,
}

impl Default for Palette {
    /// The fallback palette
    fn default() -> Self {
        Self {
            values: Slot::ALL
                .iter()
                .map(|slot| (*slot, slot.fallback().to_string()))
                .collect(),
        }
    }
}

impl Palette {
    pub fn get(&self, slot: Slot) -> &str {
        self.values
            .get(&slot)
            .map(String::as_str)
            .unwrap_or_else(|| slot.fallback())
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.values.insert(slot, value.into());
    }

    /// Evaluate the variable tables on this palette, keeping entries for which
    /// `keep` returns true
    pub fn variables_where(&self, keep: impl Fn(&str, Source) -> bool) -> VariableMap {
        all_variables()
            .filter(|(name, source)| keep(*name, *source))
            .map(|(name, source)| (*name, source.evaluate(self)))
            .collect()
    }
}

/// The built-in default variable map (fallback palette, optional overrides included)
pub fn default_variables() -> VariableMap {
    Palette::default().variables_where(|_, _| true)
}
