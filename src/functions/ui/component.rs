use poise::serenity_prelude as serenity;
use serenity::builder::CreateInteractionResponseMessage;
use serenity::{ComponentInteraction, CreateEmbed};

use crate::Error;
use crate::interactive::RenderPayload;

/// Sends a simple ephemeral message in response to a component interaction.
pub async fn send_ephemeral_response(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    content: impl Into<String>,
) -> Result<(), Error> {
    let response = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);

    interaction
        .create_response(ctx, serenity::CreateInteractionResponse::Message(response))
        .await?;
    Ok(())
}

/// Sends an ephemeral embed in response to a component interaction.
pub async fn send_ephemeral_embed(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    embed: CreateEmbed,
) -> Result<(), Error> {
    let response = CreateInteractionResponseMessage::new()
        .embed(embed)
        .ephemeral(true);

    interaction
        .create_response(ctx, serenity::CreateInteractionResponse::Message(response))
        .await?;
    Ok(())
}

/// Updates the original message tied to the component interaction in place.
pub async fn update_component_message(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    payload: RenderPayload,
) -> Result<(), Error> {
    interaction
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::UpdateMessage(payload.into_update()),
        )
        .await?;
    Ok(())
}
