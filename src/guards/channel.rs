use poise::async_trait;
use poise::serenity_prelude::ChannelId;

use super::{Guard, GuardFailure};
use crate::Context;

/// Restricts a command to an allow-list of channels.
pub struct ChannelGuard {
    allowed: Vec<ChannelId>,
}

impl ChannelGuard {
    pub fn new(allowed: Vec<ChannelId>) -> Self {
        Self { allowed }
    }
}

#[async_trait]
impl Guard for ChannelGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        decide(&self.allowed, ctx.channel_id())
    }
}

fn decide(allowed: &[ChannelId], current: ChannelId) -> Result<(), GuardFailure> {
    if allowed.contains(&current) {
        Ok(())
    } else {
        Err(GuardFailure::new("Invalid channel"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_channels_pass() {
        let allowed = vec![ChannelId::new(10), ChannelId::new(20)];
        assert!(decide(&allowed, ChannelId::new(20)).is_ok());
    }

    #[test]
    fn unlisted_channels_fail() {
        let allowed = vec![ChannelId::new(10)];
        assert!(decide(&allowed, ChannelId::new(99)).is_err());
    }
}
