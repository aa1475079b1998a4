use crate::{
    config::BotConfig,
    constants::BOT_SECRET_ENV,
    error::{ConnectError, Result},
    validate::ValidationOptions,
    Cli,
};
use std::env;
use tokio::io::AsyncRead;
use tracing::debug;

pub mod connect_luis;

/// Secret from `--secret`, falling back to `MSBOT_SECRET`
pub fn resolve_secret(cli: &Cli) -> Option<String> {
    cli.secret
        .clone()
        .or_else(|| env::var(BOT_SECRET_ENV).ok())
        .filter(|s| !s.is_empty())
}

/// Load the bot file named by `--bot`, or the first one in the current directory
pub async fn load_bot_config(cli: &Cli) -> Result<BotConfig> {
    let secret = resolve_secret(cli);
    match &cli.bot {
        Some(path) => BotConfig::load(path, secret.as_deref()).await,
        None => {
            let cwd = env::current_dir().map_err(|e| ConnectError::load(".", e))?;
            debug!(dir = %cwd.display(), "no --bot given, searching for a bot file");
            BotConfig::load_from_folder(cwd, secret.as_deref()).await
        }
    }
}

/// Run `connect luis` end to end and hand back the updated bot file
pub async fn run<R>(cli: Cli, stdin: R, options: ValidationOptions) -> Result<BotConfig>
where
    R: AsyncRead + Unpin,
{
    let mut config = load_bot_config(&cli).await?;
    let bot_name = config.name().to_string();
    connect_luis::run(&mut config, &bot_name, &cli, stdin, &options).await?;
    Ok(config)
}
