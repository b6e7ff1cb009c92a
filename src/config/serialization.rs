//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize an optional string as a live key or a commented example
    fn optional_line(key: &str, value: Option<&str>, example: &str) -> String {
        match value {
            Some(value) => format!("{} = {:?}", key, value),
            None => format!("# {} = {:?}", key, example),
        }
    }

    /// Serialize the config to a commented TOML document
    pub fn to_toml(&self) -> String {
        let descriptor = &self.descriptor;
        let logging = &self.logging;

        format!(
            r#"# sn-theme configuration
# Command-line flags override these values, environment variables
# (SN_THEME_OUT, SN_THEME_HOST, SN_THEME_PORT, SN_THEME_CDN, SN_THEME_LOG)
# override the file.

# Output directory for theme.css and ext.json
out = {out:?}

# Theme metadata written into ext.json
[descriptor]
name = {name:?}
identifier = {identifier:?}
version = {version:?}
description = {description:?}
# Standalone hosting: ext.json URLs point here instead of a relative path
{cdn}
{marketing}
light = {light}

# Local development server (sn-theme --serve)
[server]
host = {host:?}
port = {port}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# File logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            out = self.out_dir.display().to_string(),
            name = descriptor.name,
            identifier = descriptor.identifier,
            version = descriptor.version,
            description = descriptor.description,
            cdn = Self::optional_line(
                "cdn",
                descriptor.cdn.as_deref(),
                "https://cdn.jsdelivr.net/gh/USER/REPO@TAG/dist"
            ),
            marketing = Self::optional_line(
                "marketing_url",
                descriptor.marketing_url.as_deref(),
                "https://github.com/USER/REPO"
            ),
            light = descriptor.light,
            host = self.host,
            port = self.port,
            log_level = logging.level,
            log_file_enabled = logging.file_enabled,
            log_file_dir = logging.file_dir.display().to_string(),
            log_file_rotation = logging.file_rotation.as_str(),
            log_file_prefix = logging.file_prefix,
        )
    }
}
