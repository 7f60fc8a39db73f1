use poise::async_trait;

use super::{Guard, GuardFailure};
use crate::Context;

/// Only the guild owner passes.
pub struct ServerOwnerGuard;

#[async_trait]
impl Guard for ServerOwnerGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        let owner_id = { ctx.guild().map(|guild| guild.owner_id) };

        let Some(owner_id) = owner_id else {
            tracing::warn!("while executing ServerOwnerGuard, guild was not found");
            return Err(GuardFailure::new(
                "While executing ServerOwnerGuard, guild was not found",
            ));
        };

        if owner_id == ctx.author().id {
            Ok(())
        } else {
            Err(GuardFailure::new("You are not the owner of the server"))
        }
    }
}
