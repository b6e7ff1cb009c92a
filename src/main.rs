// sn-theme - Standard Notes StyleKit theme generator
//
// Generates theme.css (StyleKit CSS variable overrides) and ext.json (the
// plugin descriptor) from a palette, and can serve them locally with CORS so
// the app can install the theme straight from the development machine.
//
// Architecture:
// - Theme (theme/): palette extraction, variable resolution, rendering
// - Generator: runs one extract -> resolve -> render -> write pass
// - Output: staged writes into the output directory
// - Server (axum + tower-http): static files with CORS, optional
// - Config: CLI > env > config file > defaults

mod cli;
mod config;
mod error;
mod generator;
mod logging;
mod output;
mod report;
mod server;
mod theme;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use std::process::ExitCode;

/// Exit status for configuration, filesystem and server errors
const FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle the config subcommand first; it never generates
    if let Some(command) = &cli.command {
        return match cli::handle_command(command, cli.config.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {:#}", e);
                ExitCode::from(FAILURE)
            }
        };
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(FAILURE);
        }
    };

    // Guard flushes file logs on drop, keep it for the whole run
    let _log_guard = logging::init(&config.logging);

    if let Some(path) = &config.source {
        tracing::debug!("Loaded config from {}", path.display());
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(FAILURE)
        }
    }
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let options = cli.generate_options(config);
    let (host, port) = cli.bind(config);

    let generated = generator::generate(&options)?;
    report::print_generated(&generated, &host, port);

    if cli.serve {
        let static_server = cli.server(config, options.out_dir.clone());
        // Bind before printing the banner so a taken port fails fast
        let listener = static_server.bind().await?;
        report::print_serving(&options.out_dir, &static_server.address());
        static_server
            .serve_on(listener, server::shutdown_signal())
            .await?;
    }

    Ok(())
}
