//! ytsum: summarise YouTube videos over HTTP or from the command line

use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::*;
use config::YtsumConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging, RUST_LOG wins over -v
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = match YtsumConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    let result = match args.command {
        Commands::Serve { bind } => {
            let config = config.with_bind_address(bind);
            commands::serve::handle_serve_command(&config).await
        }
        Commands::Summarise(summarise_args) => {
            commands::summarise::handle_summarise_command(summarise_args, &config).await
        }
    };

    match result {
        Ok(_) => {
            info!("Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {}", e);
            process::exit(1);
        }
    }
}
