// Artifact rendering - theme.css and ext.json
//
// Both outputs are pure functions of their inputs; identical inputs give
// byte-identical text.

use super::VariableMap;
use crate::error::{Result, ThemeError};
use serde::Serialize;

pub const CSS_FILENAME: &str = "theme.css";
pub const EXT_FILENAME: &str = "ext.json";

/// Package type the host's extension loader expects for themes
const CONTENT_TYPE: &str = "SN|Theme";
const AREA: &str = "themes";

/// Circular dock icon shown by the host for the theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockIcon {
    #[serde(rename = "type")]
    pub kind: String,
    pub background_color: String,
    pub foreground_color: String,
    pub border_color: String,
}

impl DockIcon {
    pub fn circle(background: &str, foreground: &str, border: &str) -> Self {
        Self {
            kind: "circle".to_string(),
            background_color: background.to_string(),
            foreground_color: foreground.to_string(),
            border_color: border.to_string(),
        }
    }
}

/// Descriptor metadata for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub name: String,
    /// Reverse-domain identifier, e.g. `org.example.my-theme`
    pub identifier: String,
    pub version: String,
    pub description: String,
    /// Base URL for standalone hosting; artifacts are addressed relative to it
    pub cdn_base: Option<String>,
    pub marketing_url: Option<String>,
    pub is_dark: bool,
    pub dock_icon: Option<DockIcon>,
}

impl ThemeDescriptor {
    fn cdn_url(&self, filename: &str) -> Option<String> {
        self.cdn_base
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), filename))
    }

    /// Where the host fetches theme.css from
    pub fn css_url(&self) -> String {
        self.cdn_url(CSS_FILENAME)
            .unwrap_or_else(|| CSS_FILENAME.to_string())
    }

    /// Self-update link, only meaningful for CDN-hosted themes
    pub fn latest_url(&self) -> Option<String> {
        self.cdn_url(EXT_FILENAME)
    }
}

/// ext.json wire shape; field order is the output order
#[derive(Serialize)]
struct ExtJson<'a> {
    identifier: &'a str,
    name: &'a str,
    content_type: &'static str,
    area: &'static str,
    version: &'a str,
    description: &'a str,
    url: String,
    #[serde(rename = "isDark")]
    is_dark: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marketing_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dock_icon: Option<&'a DockIcon>,
}

/// The two generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTheme {
    pub css: String,
    pub ext_json: String,
}

/// Render the `:root` block, one declaration per variable, plus optional
/// trailing rules
pub fn render_css(vars: &VariableMap, extra_rules: Option<&str>) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in vars.sorted() {
        css.push_str(&format!("  {}: {};\n", name, value));
    }
    css.push_str("}\n");

    if let Some(extra) = extra_rules.map(str::trim_end).filter(|e| !e.trim().is_empty()) {
        css.push('\n');
        css.push_str(extra);
        css.push('\n');
    }
    css
}

/// Render ext.json (pretty-printed, trailing newline)
pub fn render_descriptor(descriptor: &ThemeDescriptor) -> Result<String> {
    let ext = ExtJson {
        identifier: &descriptor.identifier,
        name: &descriptor.name,
        content_type: CONTENT_TYPE,
        area: AREA,
        version: &descriptor.version,
        description: &descriptor.description,
        url: descriptor.css_url(),
        is_dark: descriptor.is_dark,
        latest_url: descriptor.latest_url(),
        marketing_url: descriptor.marketing_url.as_deref().filter(|u| !u.is_empty()),
        dock_icon: descriptor.dock_icon.as_ref(),
    };

    let mut json = serde_json::to_string_pretty(&ext)
        .map_err(|e| ThemeError::config(format!("cannot serialize {}: {}", EXT_FILENAME, e)))?;
    json.push('\n');
    Ok(json)
}

/// Render both artifacts
pub fn render(
    vars: &VariableMap,
    descriptor: &ThemeDescriptor,
    extra_rules: Option<&str>,
) -> Result<RenderedTheme> {
    Ok(RenderedTheme {
        css: render_css(vars, extra_rules),
        ext_json: render_descriptor(descriptor)?,
    })
}
