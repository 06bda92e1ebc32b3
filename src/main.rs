mod api;
mod app;
mod booking;
mod cli;
mod commands;
mod config;
mod conversation;
mod error;
mod favorites;
mod pricing;
mod repl;
mod session;
mod ui;

use api::{BackendClient, HttpTransport};
use app::App;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use config::RestavoConfig;
use error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use repl::Repl;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let workspace = env::current_dir().map_err(|e| {
        error::RestavoError::Config(format!("Failed to get current directory: {}", e))
    })?;

    let mut config = match RestavoConfig::load(&workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), e);
            std::process::exit(1);
        }
    };
    cli.apply_to(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("{} {}", "Error:".bright_red().bold(), e);
        std::process::exit(1);
    }
    tracing::debug!(?config, "Configuration loaded");

    let transport = HttpTransport::new(&config.base_url, config.request_timeout())?;
    let client = BackendClient::new(transport, config.max_chat_attempts);
    let app = App::new(client, StdRng::from_os_rng());

    let mut repl = Repl::new(app, config);

    if let Some(prompt) = cli.prompt {
        repl.process_single_prompt(&prompt).await?;
    } else if let Some(city) = cli.search {
        repl.process_single_search(&city).await?;
    } else {
        repl.run().await?;
    }

    Ok(())
}
