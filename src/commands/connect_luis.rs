use crate::{
    args,
    config::ServiceStore,
    error::Result,
    schema::LuisService,
    validate::{validate, LuisArgs, ValidationOptions},
    Cli,
};
use tokio::io::AsyncRead;

/// Collect, validate and register a LUIS service against an already loaded store
///
/// `bot_name` seeds the service name when `--name` is not given. Nothing is
/// written to `store` unless validation succeeds.
pub async fn run<S, R>(
    store: &mut S,
    bot_name: &str,
    cli: &Cli,
    stdin: R,
    options: &ValidationOptions,
) -> Result<LuisService>
where
    S: ServiceStore + Send,
    R: AsyncRead + Unpin,
{
    let candidate = args::collect(cli, bot_name, stdin).await?;
    let luis = validate(candidate, options)?;
    register(store, luis).await
}

/// Add the LUIS record to `store` and save it
pub async fn register<S>(store: &mut S, args: LuisArgs) -> Result<LuisService>
where
    S: ServiceStore + Send,
{
    let service = LuisService {
        name: args.name,
        id: args.app_id.clone(),
        app_id: args.app_id,
        version: args.version,
        subscription_key: args.subscription_key,
        authoring_key: args.authoring_key,
    };
    store.connect_service(service.clone().into());
    store.save().await?;
    Ok(service)
}
