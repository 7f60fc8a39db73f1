use crate::commands;
use crate::commands::blackjack::ShoeStore;
use crate::events;
use crate::interactive::ComponentRegistry;
use crate::settings::Settings;
use poise::serenity_prelude as serenity;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

pub fn gateway_intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

pub fn prefix_options() -> poise::PrefixFrameworkOptions<Data, Error> {
    poise::PrefixFrameworkOptions {
        prefix: Some("c!".into()),
        additional_prefixes: vec![poise::Prefix::Literal("croupier!")],
        ..Default::default()
    }
}

pub struct Data {
    pub shard_manager: Arc<serenity::ShardManager>,
    pub settings: Settings,
    pub components: ComponentRegistry,
    pub shoes: ShoeStore,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<serenity::ShardManager>;
}

/// Builds the Poise framework with all commands and the provided prefix options
pub fn build_framework(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
    settings: Settings,
    owners: Vec<u64>,
) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(framework_options(prefix_options, owners))
        .setup(move |ctx, ready, framework| {
            let settings = settings.clone();
            Box::pin(async move { setup_framework(ctx, ready, framework, settings).await })
        })
        .build()
}

pub async fn run_client(
    token: String,
    intents: serenity::GatewayIntents,
    framework: poise::Framework<Data, Error>,
) -> Result<(), Error> {
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
    }

    client.start_autosharded().await?;

    Ok(())
}

fn framework_options(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
    owners: Vec<u64>,
) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands::load_all(),
        prefix_options,
        owners: owners.into_iter().map(serenity::UserId::new).collect(),
        event_handler: events::dispatch,
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

async fn setup_framework(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<Data, Error>,
    settings: Settings,
) -> Result<Data, Error> {
    register_commands(ctx, framework).await?;
    let shard_manager = extract_shard_manager(ctx).await;
    tracing::info!("{} is connected and ready", ready.user.display_name());

    let shoes = ShoeStore::new(commands::blackjack::deck_policy(&settings));

    Ok(Data {
        shard_manager,
        settings,
        components: ComponentRegistry::new(),
        shoes,
    })
}

/// Command and handler errors end up here; the process keeps running.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("command `{}` failed: {error}", ctx.command().qualified_name);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            tracing::error!(
                "event handler for `{}` failed: {error}",
                event.snake_case_name()
            );
        }
        other => {
            if let Err(err) = poise::builtins::on_error(other).await {
                tracing::error!("failed to report framework error: {err}");
            }
        }
    }
}

async fn register_commands(
    ctx: &serenity::Context,
    framework: &poise::Framework<Data, Error>,
) -> Result<(), Error> {
    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
    Ok(())
}

async fn extract_shard_manager(ctx: &serenity::Context) -> Arc<serenity::ShardManager> {
    let data = ctx.data.read().await;
    data.get::<ShardManagerContainer>()
        .cloned()
        .expect("Shard manager missing from TypeMap")
}
