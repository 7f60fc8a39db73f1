use poise::async_trait;
use poise::serenity_prelude::ChannelType;

use super::{Guard, GuardFailure};
use crate::Context;

/// Requires the current channel to be marked NSFW.
pub struct NsfwChannelGuard;

#[async_trait]
impl Guard for NsfwChannelGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        let Some(channel) = ctx.guild_channel().await else {
            return Ok(());
        };

        if channel.kind == ChannelType::Text && !channel.nsfw {
            return Err(GuardFailure::new("Channel is not NSFW"));
        }

        Ok(())
    }
}
