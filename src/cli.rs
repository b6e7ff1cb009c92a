// CLI module - command-line argument parsing and handlers
//
// The top-level flags drive theme generation. One subcommand manages the
// config file:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --init: Write the default template (never overwrites)

use crate::config::Config;
use crate::generator::GenerateOptions;
use crate::server::StaticServer;
use crate::theme::ThemeDescriptor;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate and optionally serve a Standard Notes theme from StyleKit CSS variables
#[derive(Parser, Debug)]
#[command(name = "sn-theme")]
#[command(about = "Generate and optionally serve a Standard Notes theme from StyleKit CSS variables", long_about = None)]
// --version sets the theme version, not the tool's
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/sn-theme/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// HTML file to extract the palette from
    #[arg(long, value_name = "PATH")]
    pub from_index: Option<PathBuf>,

    /// JSON file containing a CSS variable map
    #[arg(long = "vars", value_name = "PATH")]
    pub vars: Option<PathBuf>,

    /// Override/add a CSS variable, e.g. --set "--sn-stylekit-info-color=#7cb8bb" (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", allow_hyphen_values = true)]
    pub set: Vec<String>,

    /// Output directory for ext.json and theme.css [default: dist]
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Theme name shown in the host application
    #[arg(long)]
    pub name: Option<String>,

    /// Reverse-domain theme identifier
    #[arg(long)]
    pub identifier: Option<String>,

    /// Theme version string
    #[arg(long)]
    pub version: Option<String>,

    /// Theme description shown in the host application
    #[arg(long)]
    pub description: Option<String>,

    /// CDN base URL for standalone hosting (ext.json URLs point here)
    #[arg(long, value_name = "URL")]
    pub cdn: Option<String>,

    /// URL to the project homepage
    #[arg(long, value_name = "URL")]
    pub marketing_url: Option<String>,

    /// Mark the theme as light (default is dark)
    #[arg(long)]
    pub light: bool,

    /// Host for the local server and import hints [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Port for the local server and import hints [default: 8001]
    #[arg(long)]
    pub port: Option<u16>,

    /// Run a local CORS-enabled server after generating files
    #[arg(long)]
    pub serve: bool,

    /// Do not emit optional override variables
    #[arg(long)]
    pub no_optional_overrides: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Write the default config template if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Generation inputs: flags over config values
    pub fn generate_options(&self, config: &Config) -> GenerateOptions {
        let defaults = &config.descriptor;

        let descriptor = ThemeDescriptor {
            name: self.name.clone().unwrap_or_else(|| defaults.name.clone()),
            identifier: self
                .identifier
                .clone()
                .unwrap_or_else(|| defaults.identifier.clone()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| defaults.version.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| defaults.description.clone()),
            cdn_base: self
                .cdn
                .clone()
                .or_else(|| defaults.cdn.clone())
                .filter(|c| !c.is_empty()),
            marketing_url: self
                .marketing_url
                .clone()
                .or_else(|| defaults.marketing_url.clone())
                .filter(|u| !u.is_empty()),
            is_dark: !(self.light || defaults.light),
            dock_icon: None,
        };

        GenerateOptions {
            from_index: self.from_index.clone(),
            vars_file: self.vars.clone(),
            overrides: self.set.clone(),
            out_dir: self.out.clone().unwrap_or_else(|| config.out_dir.clone()),
            include_optional: !self.no_optional_overrides,
            descriptor,
        }
    }

    /// Host and port after flag overrides
    pub fn bind(&self, config: &Config) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| config.host.clone()),
            self.port.unwrap_or(config.port),
        )
    }

    /// Static server for the output directory
    pub fn server(&self, config: &Config, root: PathBuf) -> StaticServer {
        let (host, port) = self.bind(config);
        StaticServer::new(root, host, port)
    }
}

/// Handle the config subcommand
pub fn handle_command(command: &Commands, explicit: Option<&std::path::Path>) -> Result<()> {
    match command {
        Commands::Config { show, path, init } => {
            let target = match explicit {
                Some(p) => Some(p.to_path_buf()),
                None => Config::config_path(),
            };

            if *path {
                let target = target.context("Could not determine config path")?;
                println!("{}", target.display());
            } else if *init {
                let target = target.context("Could not determine config path")?;
                if Config::init_template(&target)? {
                    println!("Wrote default config to {}", target.display());
                } else {
                    println!("Config already exists at {}", target.display());
                }
            } else if *show {
                handle_config_show(explicit)?;
            } else {
                // No flag provided, show help
                println!("Usage: sn-theme config [--show|--path|--init]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --init    Write the default config template");
            }
            Ok(())
        }
    }
}

fn handle_config_show(explicit: Option<&std::path::Path>) -> Result<()> {
    let config = Config::load(explicit)?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    match &config.source {
        Some(path) => println!("# Source: {}", path.display()),
        None => println!("# Source: defaults (no config file)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sn-theme").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_set_accepts_hyphen_leading_values() {
        let cli = parse(&[
            "--from-index",
            "index.html",
            "--set",
            "--sn-stylekit-background-color=#1c1c1c",
            "--set",
            "--sn-stylekit-info-color=#7cb8bb",
        ]);
        assert_eq!(
            cli.set,
            vec![
                "--sn-stylekit-background-color=#1c1c1c",
                "--sn-stylekit-info-color=#7cb8bb"
            ]
        );
        assert_eq!(cli.from_index, Some(PathBuf::from("index.html")));
    }

    #[test]
    fn test_version_flag_is_theme_version() {
        let cli = parse(&["--vars", "vars.json", "--version", "2.1.0"]);
        let options = cli.generate_options(&Config::default());
        assert_eq!(options.descriptor.version, "2.1.0");
    }

    #[test]
    fn test_defaults_come_from_config() {
        let cli = parse(&["--vars", "vars.json"]);
        let mut config = Config::default();
        config.out_dir = PathBuf::from("public");
        config.descriptor.name = "From Config".to_string();
        config.descriptor.cdn = Some("https://cdn.example.com".to_string());

        let options = cli.generate_options(&config);
        assert_eq!(options.out_dir, PathBuf::from("public"));
        assert_eq!(options.descriptor.name, "From Config");
        assert_eq!(
            options.descriptor.cdn_base.as_deref(),
            Some("https://cdn.example.com")
        );
        assert!(options.descriptor.is_dark);
        assert!(options.include_optional);
        assert_eq!(cli.bind(&config), ("localhost".to_string(), 8001));
    }

    #[test]
    fn test_flags_beat_config() {
        let cli = parse(&[
            "--vars",
            "vars.json",
            "--out",
            "build",
            "--name",
            "Flagged",
            "--light",
            "--no-optional-overrides",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--serve",
        ]);
        let options = cli.generate_options(&Config::default());

        assert_eq!(options.out_dir, PathBuf::from("build"));
        assert_eq!(options.descriptor.name, "Flagged");
        assert!(!options.descriptor.is_dark);
        assert!(!options.include_optional);
        assert!(cli.serve);
        assert_eq!(cli.bind(&Config::default()), ("0.0.0.0".to_string(), 9000));
    }

    #[test]
    fn test_config_subcommand() {
        let cli = parse(&["config", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, .. })
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["sn-theme", "--port", "99999"]).is_err());
    }
}
