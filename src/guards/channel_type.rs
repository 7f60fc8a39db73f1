use poise::async_trait;
use poise::serenity_prelude::ChannelType;

use super::{Guard, GuardFailure};
use crate::Context;

/// Restricts a command to the given channel types.
pub struct ChannelTypeGuard {
    channel_types: Vec<ChannelType>,
}

impl ChannelTypeGuard {
    pub fn new(channel_types: Vec<ChannelType>) -> Self {
        Self { channel_types }
    }
}

#[async_trait]
impl Guard for ChannelTypeGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        // Unresolvable channels (e.g. DMs without cache) pass through, as a
        // missing channel is not this guard's failure to report.
        let Some(channel) = ctx.guild_channel().await else {
            return Ok(());
        };

        if self.channel_types.contains(&channel.kind) {
            Ok(())
        } else {
            Err(GuardFailure::new("Invalid channel type"))
        }
    }
}
