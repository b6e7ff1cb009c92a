// Generator - one generation run from inputs to files on disk
//
// extract (optional) -> resolve -> render -> write
//
// Everything that can fail on user input (overrides, variable file, missing
// sources) fails before the output directory is touched.

use crate::error::{Result, ThemeError};
use crate::output::{OutputDir, WrittenFiles};
use crate::theme::palette::default_variables;
use crate::theme::resolve::load_variables_file;
use crate::theme::{
    extract, render, ExtractedPalette, RenderedTheme, ThemeDescriptor, VariableMap,
    VariableSources,
};
use std::path::PathBuf;

/// Inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// HTML file to extract a palette from
    pub from_index: Option<PathBuf>,
    /// JSON variable file
    pub vars_file: Option<PathBuf>,
    /// Raw `KEY=VALUE` overrides, in order
    pub overrides: Vec<String>,
    pub out_dir: PathBuf,
    /// Emit optional override variables from defaults and palette
    pub include_optional: bool,
    /// Descriptor metadata; the dock icon is filled in from the palette
    pub descriptor: ThemeDescriptor,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct Generated {
    pub variables: VariableMap,
    pub descriptor: ThemeDescriptor,
    pub rendered: RenderedTheme,
    pub files: WrittenFiles,
}

/// Resolve and render without writing anything
pub fn build(options: &GenerateOptions) -> Result<(VariableMap, ThemeDescriptor, RenderedTheme)> {
    if options.from_index.is_none() && options.vars_file.is_none() {
        return Err(ThemeError::config(
            "no variable source: use --from-index or --vars",
        ));
    }

    let file = options
        .vars_file
        .as_deref()
        .map(load_variables_file)
        .transpose()?;

    let extracted: Option<ExtractedPalette> = options
        .from_index
        .as_deref()
        .map(extract::extract_from_file)
        .transpose()?;

    let sources = VariableSources {
        defaults: default_variables(),
        file,
        palette: extracted.as_ref().map(ExtractedPalette::variables),
        overrides: options.overrides.clone(),
        include_optional: options.include_optional,
    };
    let variables = sources.resolve()?;

    let mut descriptor = options.descriptor.clone();
    let mut extra_rules = None;
    if let Some(extracted) = extracted.as_ref().filter(|e| !e.is_empty()) {
        descriptor.dock_icon = Some(extracted.dock_icon());
        extra_rules = Some(extracted.anchor_rule());
    }

    let rendered = render::render(&variables, &descriptor, extra_rules.as_deref())?;
    Ok((variables, descriptor, rendered))
}

/// Full run: build, then write both artifacts
pub fn generate(options: &GenerateOptions) -> Result<Generated> {
    let (variables, descriptor, rendered) = build(options)?;

    let out = OutputDir::create(&options.out_dir)?;
    let files = out.write_theme(&rendered)?;

    tracing::info!(
        "Generated {} variable(s) into {}",
        variables.len(),
        out.path().display()
    );

    Ok(Generated {
        variables,
        descriptor,
        rendered,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::is_non_essential;
    use std::fs;
    use std::path::Path;

    const INDEX_HTML: &str = r#"<style>
body { background: #1c1c1c; color: #d0d0d0; font-family: 'Courier New', monospace; }
h1 { color: #8cd0d3; } .info { color: #7cb8bb; } a { color: #93e0e3; }
</style>"#;

    fn descriptor() -> ThemeDescriptor {
        ThemeDescriptor {
            name: "Emacs Org Mode".to_string(),
            identifier: "lt.sarunas.emacs-org-mode-theme".to_string(),
            version: "1.0.0".to_string(),
            description: "test".to_string(),
            cdn_base: None,
            marketing_url: None,
            is_dark: true,
            dock_icon: None,
        }
    }

    fn options(root: &Path) -> GenerateOptions {
        let index = root.join("index.html");
        fs::write(&index, INDEX_HTML).unwrap();
        GenerateOptions {
            from_index: Some(index),
            vars_file: None,
            overrides: Vec::new(),
            out_dir: root.join("dist"),
            include_optional: true,
            descriptor: descriptor(),
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path());

        let first = generate(&opts).unwrap();
        let css_1 = fs::read(&first.files.css).unwrap();
        let json_1 = fs::read(&first.files.ext_json).unwrap();

        let second = generate(&opts).unwrap();
        assert_eq!(fs::read(&second.files.css).unwrap(), css_1);
        assert_eq!(fs::read(&second.files.ext_json).unwrap(), json_1);
    }

    #[test]
    fn test_bad_override_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.overrides = vec!["badoverride".to_string()];

        let err = generate(&opts).unwrap_err();
        assert!(matches!(err, ThemeError::Configuration(_)));
        assert!(!opts.out_dir.exists());
    }

    #[test]
    fn test_requires_a_variable_source() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.from_index = None;
        opts.overrides = vec!["--sn-stylekit-info-color=#fff".to_string()];

        assert!(matches!(
            generate(&opts),
            Err(ThemeError::Configuration(_))
        ));
        assert!(!opts.out_dir.exists());
    }

    #[test]
    fn test_unusable_variable_names_write_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let vars = tmp.path().join("vars.json");
        fs::write(&vars, r#"{"": "x", "color": "red"}"#).unwrap();

        let mut opts = options(tmp.path());
        opts.vars_file = Some(vars);

        assert!(matches!(
            generate(&opts),
            Err(ThemeError::Configuration(_))
        ));
        assert!(!opts.out_dir.exists());
    }

    #[test]
    fn test_set_value_cannot_add_declarations() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.overrides = vec![
            "--sn-stylekit-info-color=red;\n  --sn-stylekit-background-color: #ffffff".to_string(),
        ];

        assert!(matches!(
            generate(&opts),
            Err(ThemeError::Configuration(_))
        ));
        assert!(!opts.out_dir.exists());
    }

    #[test]
    fn test_set_beats_variable_file_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let vars = tmp.path().join("vars.json");
        fs::write(
            &vars,
            r##"{"--sn-stylekit-danger-color": "#ff0000", "--sn-stylekit-grey-1": "#010101"}"##,
        )
        .unwrap();

        let mut opts = options(tmp.path());
        opts.from_index = None;
        opts.vars_file = Some(vars);
        opts.overrides = vec!["--sn-stylekit-danger-color=#00ff00".to_string()];

        let generated = generate(&opts).unwrap();
        let css = fs::read_to_string(&generated.files.css).unwrap();
        assert!(css.contains("  --sn-stylekit-danger-color: #00ff00;\n"));
        assert!(!css.contains("#ff0000"));
        assert!(css.contains("  --sn-stylekit-grey-1: #010101;\n"));
        // no palette extraction: no anchor rule, no dock icon
        assert!(!css.contains("a { color"));
        assert!(generated.descriptor.dock_icon.is_none());
    }

    #[test]
    fn test_background_override_replaces_default() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        fs::write(opts.from_index.as_ref().unwrap(), "<p>no colors</p>").unwrap();
        opts.overrides = vec!["--sn-stylekit-background-color=#101010".to_string()];

        let generated = generate(&opts).unwrap();
        assert!(generated
            .rendered
            .css
            .contains("  --sn-stylekit-background-color: #101010;\n"));
    }

    #[test]
    fn test_no_optional_overrides_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.include_optional = false;

        let generated = generate(&opts).unwrap();
        let css = fs::read_to_string(&generated.files.css).unwrap();

        for (name, _) in generated.variables.iter() {
            assert!(!is_non_essential(name), "{} leaked", name);
        }
        assert!(!css.contains("--modal-background-color"));
        assert!(!css.contains("--link-element-color"));
    }

    #[test]
    fn test_every_variable_rendered_once() {
        let tmp = tempfile::tempdir().unwrap();
        let generated = generate(&options(tmp.path())).unwrap();

        for (name, value) in generated.variables.iter() {
            let line = format!("  {}: {};\n", name, value);
            assert_eq!(generated.rendered.css.matches(&line).count(), 1);
        }
    }

    #[test]
    fn test_palette_adds_dock_icon_and_anchor_rule() {
        let tmp = tempfile::tempdir().unwrap();
        let generated = generate(&options(tmp.path())).unwrap();

        assert!(generated
            .rendered
            .css
            .ends_with("}\n\na { color: #93e0e3; }\n"));
        let icon = generated.descriptor.dock_icon.unwrap();
        assert_eq!(icon.foreground_color, "#8cd0d3");
        assert_eq!(icon.border_color, "#7cb8bb");
        assert!(generated.rendered.ext_json.contains("\"dock_icon\""));
    }

    #[test]
    fn test_cdn_url_in_descriptor() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.descriptor.cdn_base = Some("https://cdn.example.com/dist".to_string());

        let generated = generate(&opts).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&generated.files.ext_json).unwrap()).unwrap();
        assert!(json["url"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.example.com/dist"));
    }
}
