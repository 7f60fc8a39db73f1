use poise::async_trait;
use poise::serenity_prelude::CreateEmbed;
use std::fmt;

use crate::functions::format::pretty_message;
use crate::functions::ui::embed::Palette;
use crate::{Context, Error, constants::icon};

pub mod channel;
pub mod channel_type;
pub mod nested;
pub mod nsfw;
pub mod role;
pub mod server_owner;

pub use channel::ChannelGuard;
pub use channel_type::ChannelTypeGuard;
pub use nested::{AndGuard, OrGuard};
pub use nsfw::NsfwChannelGuard;
pub use role::RoleGuard;
pub use server_owner::ServerOwnerGuard;

/// A failed guard check, carried as a value rather than an exception so
/// failures from several guards can be aggregated before deciding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardFailure {
    message: String,
}

impl GuardFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A predicate checked before a command handler runs.
#[async_trait]
pub trait Guard: Send + Sync {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure>;
}

/// Runs every guard, collecting all failures instead of stopping at the
/// first one.
pub async fn evaluate(ctx: &Context<'_>, guards: &[&dyn Guard]) -> Vec<GuardFailure> {
    let mut failures = Vec::new();
    for guard in guards {
        if let Err(failure) = guard.check(ctx).await {
            failures.push(failure);
        }
    }
    failures
}

/// Evaluates the guards and reports every failure to the user in one
/// ephemeral embed. Returns whether the command may proceed.
pub async fn enforce(ctx: &Context<'_>, guards: &[&dyn Guard]) -> Result<bool, Error> {
    let failures = evaluate(ctx, guards).await;
    if failures.is_empty() {
        return Ok(true);
    }

    let palette = Palette::from_settings(&ctx.data().settings);
    let lines: Vec<String> = failures
        .iter()
        .map(|failure| pretty_message(icon::ERROR, failure.message()))
        .collect();

    let embed = CreateEmbed::new()
        .colour(palette.error)
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_exposes_its_message() {
        let failure = GuardFailure::new("not allowed");
        assert_eq!(failure.message(), "not allowed");
        assert_eq!(failure.to_string(), "not allowed");
    }
}
