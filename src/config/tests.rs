//! Configuration tests
//!
//! Layering (env > file > defaults) and the TOML template round-trip.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(contents: &str) -> FileConfig {
    Config::parse_file_config(contents, Path::new("config.toml")).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The generated template must parse back into the same effective config
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = Config::parse_file_config(&toml_str, Path::new("template.toml"));
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_sources(parsed.unwrap(), no_env).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_roundtrip_with_optional_urls() {
    let mut config = Config::default();
    config.descriptor.cdn = Some("https://cdn.example.com/dist".to_string());
    config.descriptor.marketing_url = Some("https://example.com".to_string());
    config.descriptor.light = true;
    config.logging.file_rotation = LogRotation::Never;

    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env).unwrap();
    assert_eq!(reloaded, config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Layering tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::from_sources(parse(""), no_env).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.out_dir, PathBuf::from("dist"));
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 8001);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = parse(
        r#"
[descriptor]
name = "Solarized"
light = true

[server]
port = 9000
"#,
    );

    let config = Config::from_sources(file, no_env).unwrap();
    assert_eq!(config.descriptor.name, "Solarized");
    assert!(config.descriptor.light);
    assert_eq!(
        config.descriptor.identifier,
        DescriptorDefaults::default().identifier
    );
    assert_eq!(config.port, 9000);
    assert_eq!(config.host, "localhost");
}

#[test]
fn test_env_beats_file() {
    let file = parse(
        r#"
out = "site"
[server]
host = "0.0.0.0"
port = 9000
[logging]
level = "warn"
"#,
    );
    let env = env_from(&[
        ("SN_THEME_OUT", "public"),
        ("SN_THEME_PORT", "8123"),
        ("SN_THEME_CDN", "https://cdn.example.com/dist"),
        ("SN_THEME_LOG", "debug"),
    ]);

    let config = Config::from_sources(file, env).unwrap();
    assert_eq!(config.out_dir, PathBuf::from("public"));
    assert_eq!(config.port, 8123);
    // not set in env: file value
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(
        config.descriptor.cdn.as_deref(),
        Some("https://cdn.example.com/dist")
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_invalid_port_env_is_error() {
    let env = env_from(&[("SN_THEME_PORT", "eighty")]);
    let err = Config::from_sources(FileConfig::default(), env).unwrap_err();
    assert!(matches!(err, ThemeError::Configuration(_)));
}

#[test]
fn test_empty_urls_in_file_are_unset() {
    let file = parse(
        r#"
[descriptor]
cdn = ""
marketing_url = ""
"#,
    );
    let config = Config::from_sources(file, no_env).unwrap();
    assert!(config.descriptor.cdn.is_none());
    assert!(config.descriptor.marketing_url.is_none());
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    let file = parse("[logging]\nfile_rotation = \"weekly\"\n");
    let config = Config::from_sources(file, no_env).unwrap();
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_malformed_file_is_config_error() {
    let err = Config::parse_file_config("[server\nport = ", Path::new("broken.toml")).unwrap_err();
    assert!(matches!(err, ThemeError::Configuration(_)));
    assert!(err.to_string().contains("broken.toml"));
}

// ─────────────────────────────────────────────────────────────────────────────
// File loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_explicit_missing_file_is_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&tmp.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ThemeError::Configuration(_)));
}

#[test]
fn test_init_template_never_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("config.toml");

    assert!(Config::init_template(&path).unwrap());
    std::fs::write(&path, "out = \"mine\"\n").unwrap();
    assert!(!Config::init_template(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "out = \"mine\"\n");
}

#[test]
fn test_load_explicit_file_records_source() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[descriptor]\nversion = \"2.0.0\"\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.descriptor.version, "2.0.0");
    assert_eq!(config.source.as_deref(), Some(path.as_path()));
}
