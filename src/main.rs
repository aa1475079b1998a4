//! # msbot connect luis
//!
//! Connects a bot configuration (`.bot` file) to a LUIS application.
//!
//! ```bash
//! # Flags only; the .bot file in the current folder is used
//! msbot-connect-luis --name Weather --appId <uuid> --version v0.1 --authoringKey <uuid>
//!
//! # Arguments as JSON on stdin
//! echo '{"appId":"<uuid>","version":"v0.1","authoringKey":"<uuid>"}' \
//!     | msbot-connect-luis --bot MyBot.bot --stdin
//! ```
//!
//! Set `MSBOT_LOG=debug` to see what the tool is doing.

use anyhow::Result;
use clap::{
    error::{ContextKind, ErrorKind},
    CommandFactory, Parser,
};
use colored::Colorize;
use msbot_luis::{commands, constants::LOG_FILTER_ENV, validate::ValidationOptions, Cli};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter_var = if std::env::var_os(LOG_FILTER_ENV).is_some() {
        LOG_FILTER_ENV
    } else {
        EnvFilter::DEFAULT_ENV
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(filter_var)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Print one red diagnostic line followed by usage, then exit non-zero
fn abort(message: &str) -> ! {
    eprintln!("{}", message.bright_red());
    let _ = Cli::command().print_help();
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    if std::env::args_os().len() < 2 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            ErrorKind::UnknownArgument => {
                let flag = err
                    .get(ContextKind::InvalidArg)
                    .map(|arg| arg.to_string())
                    .unwrap_or_default();
                abort(&format!("Unknown arguments: {flag}"))
            }
            _ => {
                let rendered = err.to_string();
                abort(rendered.lines().next().unwrap_or_default())
            }
        },
    };

    match commands::run(cli, tokio::io::stdin(), ValidationOptions::from_env()).await {
        Ok(config) => {
            println!("Saved {}", config.location().display());
            Ok(())
        }
        Err(err) => abort(&err.headline()),
    }
}
