//! fitcoach - command-line driver for the generation client.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

use anyhow::Result;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

mod cli;
mod handlers;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = handlers::load_config(cli.config.as_deref(), cli.api_key)?;

    match cli.command {
        Command::Plan { profile, output } => {
            handlers::handle_plan(config, &profile, &output).await?;
        }
        Command::Speak { text, output } => {
            handlers::handle_speak(config, &text, &output).await?;
        }
        Command::ReadPlan {
            plan,
            day,
            section,
            output,
        } => {
            handlers::handle_read_plan(config, &plan, day.as_deref(), section, &output).await?;
        }
        Command::Illustrate { prompt, output } => {
            handlers::handle_illustrate(config, &prompt, &output).await?;
        }
    }

    Ok(())
}
