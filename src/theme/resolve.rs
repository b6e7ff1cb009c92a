// Variable resolution - layered merge of every variable source
//
// Precedence, lowest to highest:
//   built-in defaults -> variable file (--vars) -> extracted palette -> --set
//
// With optional overrides disabled, non-essential keys are stripped from the
// defaults and the palette before merging. Explicit sources are kept as given.

use super::VariableMap;
use crate::error::{Result, ThemeError};
use serde_json::Value;
use std::path::Path;

/// Every input to one resolution
#[derive(Debug, Clone, Default)]
pub struct VariableSources {
    pub defaults: VariableMap,
    pub file: Option<VariableMap>,
    pub palette: Option<VariableMap>,
    /// Raw `KEY=VALUE` strings in command-line order
    pub overrides: Vec<String>,
    /// When false, non-essential names are dropped from `defaults` and
    /// `palette` only. A non-essential name given in `file` or `overrides`
    /// was asked for explicitly and is still rendered, so "no non-essential
    /// key in the CSS" holds for runs without such explicit entries.
    pub include_optional: bool,
}

impl VariableSources {
    /// Merge all sources into the final variable map
    pub fn resolve(&self) -> Result<VariableMap> {
        // Parse first so a bad override fails before any other work
        let overrides = parse_overrides(&self.overrides)?;

        let mut resolved = if self.include_optional {
            self.defaults.clone()
        } else {
            self.defaults.clone().without_non_essential()
        };

        if let Some(file) = &self.file {
            resolved.overlay(file);
        }

        if let Some(palette) = &self.palette {
            if self.include_optional {
                resolved.overlay(palette);
            } else {
                resolved.overlay(&palette.clone().without_non_essential());
            }
        }

        resolved.overlay(&overrides);

        tracing::debug!(
            "Resolved {} variable(s) ({} from --set)",
            resolved.len(),
            overrides.len()
        );
        Ok(resolved)
    }
}

/// Parse one `KEY=VALUE` override. Splits at the first `=`; both sides are trimmed.
pub fn parse_override(item: &str) -> Result<(String, String)> {
    let Some((key, value)) = item.split_once('=') else {
        return Err(ThemeError::config(format!(
            "--set expects KEY=VALUE, got: {}",
            item
        )));
    };

    let (key, value) = (key.trim(), value.trim());
    check_entry(key, value).map_err(|reason| {
        ThemeError::config(format!("--set {}: {}", item.escape_debug(), reason))
    })?;

    Ok((key.to_string(), value.to_string()))
}

/// A name must be a custom property and a value must stay inside one
/// declaration; the returned string says which rule failed
fn check_entry(key: &str, value: &str) -> std::result::Result<(), String> {
    if key.is_empty() {
        return Err("empty variable name".to_string());
    }
    if !key.starts_with("--") {
        return Err(format!("variable name {} must start with --", key));
    }
    if let Some(c) = value.chars().find(|c| matches!(*c, ';' | '{' | '}' | '\n' | '\r')) {
        return Err(format!(
            "value for {} contains {:?}, which would end the declaration",
            key, c
        ));
    }
    Ok(())
}

/// Parse repeated overrides; later ones win for the same key
pub fn parse_overrides<S: AsRef<str>>(items: &[S]) -> Result<VariableMap> {
    let mut map = VariableMap::new();
    for item in items {
        let (key, value) = parse_override(item.as_ref())?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Parse a variable file body: a flat JSON object of string values
pub fn parse_variables_json(text: &str, origin: &Path) -> Result<VariableMap> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        ThemeError::config(format!("{} is not valid JSON: {}", origin.display(), e))
    })?;

    let Value::Object(object) = value else {
        return Err(ThemeError::config(format!(
            "{} must be a JSON object of variable names to values",
            origin.display()
        )));
    };

    let mut map = VariableMap::new();
    for (key, value) in object {
        match value {
            Value::String(s) => {
                check_entry(&key, s.trim()).map_err(|reason| {
                    ThemeError::config(format!("{}: {}", origin.display(), reason))
                })?;
                map.insert(key, s.trim());
            }
            other => {
                return Err(ThemeError::config(format!(
                    "{}: value for {} must be a string, got {}",
                    origin.display(),
                    key,
                    json_kind(&other)
                )));
            }
        }
    }
    Ok(map)
}

/// Load a variable file from disk
pub fn load_variables_file(path: &Path) -> Result<VariableMap> {
    let text = std::fs::read_to_string(path).map_err(|e| ThemeError::filesystem(path, e))?;
    let map = parse_variables_json(&text, path)?;
    tracing::info!("Loaded {} variable(s) from {}", map.len(), path.display());
    Ok(map)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
