use std::sync::{Arc, OnceLock};
use std::time::Duration;

use poise::{self, BoxFuture, serenity_prelude as serenity};
use serenity::builder::{CreateMessage, EditMessage};
use serenity::{ButtonStyle, ChannelId, CreateActionRow, CreateButton, MessageId};

use crate::constants::{colors, icon, links};
use crate::functions::format::{discord::inline_code, pretty_message};
use crate::functions::ui::component::send_ephemeral_embed;
use crate::functions::ui::disable::disable_action_rows;
use crate::functions::ui::embed::{Palette, success_embed};
use crate::interactive::{ComponentHandler, ComponentKind};
use crate::{Data, Error};

const QUICKSTART_THRESHOLD: Duration = Duration::from_secs(120);

const QUICKSTART: &str =
    "Use `/blackjack` to sit at the table. Hit draws a card, Stand ends your turn \
     and lets the dealer play. `/help` lists everything else I can do.";

pub fn event_handler<'a>(
    ctx: &'a serenity::Context,
    event: &'a serenity::FullEvent,
    framework: poise::FrameworkContext<'a, Data, Error>,
    data: &'a Data,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move { handle_mention(ctx, event, framework, data).await })
}

/// Replies to a bare @-mention with bot info and a short-lived quickstart
/// button anyone can press.
async fn handle_mention(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    let serenity::FullEvent::Message { new_message } = event else {
        return Ok(());
    };

    if new_message.author.bot || new_message.guild_id.is_none() {
        return Ok(());
    }

    let bot_id = { ctx.cache.current_user().id };
    let trimmed = new_message.content.trim();
    let mention_variants = [format!("<@{bot_id}>"), format!("<@!{bot_id}>")];
    if !mention_variants.iter().any(|mention| mention == trimmed) {
        return Ok(());
    }

    let quickstart_target: Arc<OnceLock<(Arc<serenity::Http>, ChannelId, MessageId)>> =
        Arc::new(OnceLock::new());
    let expire_target = quickstart_target.clone();

    let palette = Palette::from_settings(&data.settings);
    let quickstart_id = data.components.register(
        ComponentHandler::new(
            ComponentKind::Button,
            Arc::new(move |ctx, event, _stop| {
                Box::pin(async move {
                    if let Some(interaction) = event.as_component() {
                        send_ephemeral_embed(ctx, interaction, success_embed(palette, QUICKSTART))
                            .await?;
                    }
                    Ok(())
                })
            }),
        )
        .renew_on_interact(true)
        .execution_threshold(QUICKSTART_THRESHOLD)
        .on_expire(Box::new(move |_id| {
            Box::pin(async move {
                let Some((http, channel_id, message_id)) = expire_target.get().cloned() else {
                    return;
                };
                match channel_id.message(&http, message_id).await {
                    Ok(message) => {
                        let rows = disable_action_rows(&message.components);
                        let edit = EditMessage::new().components(rows);
                        if let Err(error) = channel_id.edit_message(&http, message_id, edit).await {
                            tracing::debug!("failed to disable quickstart button: {error}");
                        }
                    }
                    Err(error) => tracing::debug!("failed to fetch mention reply: {error}"),
                }
            })
        })),
    );

    let version = env!("CARGO_PKG_VERSION");
    let rust_version = option_env!("CROUPIER_RUSTC_VERSION").unwrap_or("unknown");
    let prefix = framework
        .options
        .prefix_options
        .prefix
        .as_deref()
        .unwrap_or("/");

    let embed = serenity::CreateEmbed::new()
        .colour(colors::FELT)
        .description(pretty_message(
            icon::CARDS,
            format!(
                "The house is open. Slash commands work everywhere; text commands take the {} prefix.",
                inline_code(prefix)
            ),
        ))
        .field("Version", format!("croupier {version}"), true)
        .field("Toolchain", rust_version, true);

    let components = vec![CreateActionRow::Buttons(vec![
        CreateButton::new(quickstart_id)
            .label("Quick start")
            .emoji(icon::BELL.as_reaction())
            .style(ButtonStyle::Secondary),
        CreateButton::new_link(links::GITHUB_REPO).label("Source"),
    ])];

    let reply = CreateMessage::new()
        .embed(embed)
        .components(components)
        .reference_message(new_message);

    let sent = new_message.channel_id.send_message(ctx, reply).await?;
    let _ = quickstart_target.set((ctx.http.clone(), sent.channel_id, sent.id));

    Ok(())
}
