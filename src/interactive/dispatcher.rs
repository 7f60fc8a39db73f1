use poise::BoxFuture;
use poise::serenity_prelude as serenity;
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse};
use serenity::UserId;

use crate::functions::ui::embed::{Palette, error_embed};
use crate::interactive::registry::{ComponentEvent, ComponentKind};
use crate::{Data, Error};

const NOT_YOURS: &str = "This component is meant for someone else to execute";

/// Gateway-facing entry point: resolves inbound component and modal
/// interactions against the registry and drives the registration lifecycle.
pub fn event_handler<'a>(
    ctx: &'a serenity::Context,
    event: &'a serenity::FullEvent,
    _framework: poise::FrameworkContext<'a, Data, Error>,
    data: &'a Data,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move { handle_interaction(ctx, event, data).await })
}

async fn handle_interaction(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    let serenity::FullEvent::InteractionCreate { interaction } = event else {
        return Ok(());
    };

    let event = match interaction {
        serenity::Interaction::Component(interaction) => {
            ComponentEvent::Component(interaction.clone())
        }
        serenity::Interaction::Modal(interaction) => ComponentEvent::Modal(interaction.clone()),
        _ => return Ok(()),
    };

    let Some(kind) = event.kind() else {
        return Ok(());
    };

    // No record means the registration expired or belongs to another
    // feature's collector; the platform shows its own failure notice.
    let Some(resolved) = data.components.lookup(event.custom_id(), kind) else {
        return Ok(());
    };

    let palette = Palette::from_settings(&data.settings);

    if !is_authorized(&resolved.allowed_executor_ids, event.user_id()) {
        // The registration and its timer stay untouched.
        respond_ephemeral(ctx, &event, error_embed(palette, NOT_YOURS)).await;
        return Ok(());
    }

    let stop = data
        .components
        .stop_handle(event.custom_id().to_owned(), kind);

    if let Err(error) = (resolved.on_execute)(ctx, &event, stop).await {
        tracing::error!(
            "failed to execute {kind} component `{}`: {error}",
            event.custom_id()
        );
        report_handler_failure(ctx, &event, kind, palette).await;
    }

    // Renew-or-consume runs even after a handler error so registrations
    // never leak; it is a no-op when the handler already called stop.
    data.components
        .settle(event.custom_id(), kind, resolved.renew_on_interact)
        .await;

    Ok(())
}

/// An empty executor list means anyone may interact.
fn is_authorized(allowed_executor_ids: &[UserId], user: UserId) -> bool {
    allowed_executor_ids.is_empty() || allowed_executor_ids.contains(&user)
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    event: &ComponentEvent,
    embed: serenity::CreateEmbed,
) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().embed(embed).ephemeral(true),
    );

    let result = match event {
        ComponentEvent::Component(interaction) => {
            interaction.create_response(ctx, response).await
        }
        ComponentEvent::Modal(interaction) => interaction.create_response(ctx, response).await,
    };

    if let Err(error) = result {
        tracing::warn!("failed to send component notice: {error}");
    }
}

/// Tells the invoking user the handler blew up: ephemerally when the
/// interaction is still unacknowledged, otherwise by editing the reply the
/// handler already made.
async fn report_handler_failure(
    ctx: &serenity::Context,
    event: &ComponentEvent,
    kind: ComponentKind,
    palette: Palette,
) {
    let message = format!("Failed to execute {kind} component, error will be reported");
    let embed = error_embed(palette, message);

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed.clone())
            .ephemeral(true),
    );

    let first_attempt = match event {
        ComponentEvent::Component(interaction) => {
            interaction.create_response(ctx, response).await
        }
        ComponentEvent::Modal(interaction) => interaction.create_response(ctx, response).await,
    };

    if first_attempt.is_err() {
        let edit = EditInteractionResponse::new().embed(embed).components(vec![]);
        let second_attempt = match event {
            ComponentEvent::Component(interaction) => {
                interaction.edit_response(ctx, edit).await.map(|_| ())
            }
            ComponentEvent::Modal(interaction) => {
                interaction.edit_response(ctx, edit).await.map(|_| ())
            }
        };

        if let Err(error) = second_attempt {
            tracing::warn!("failed to report component handler failure: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_executor_list_admits_anyone() {
        assert!(is_authorized(&[], UserId::new(7)));
    }

    #[test]
    fn listed_users_are_admitted() {
        let allowed = vec![UserId::new(1), UserId::new(2)];
        assert!(is_authorized(&allowed, UserId::new(2)));
    }

    #[test]
    fn outside_users_are_rejected() {
        let allowed = vec![UserId::new(1)];
        assert!(!is_authorized(&allowed, UserId::new(2)));
    }
}
