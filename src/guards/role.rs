use poise::async_trait;
use poise::serenity_prelude::RoleId;

use super::{Guard, GuardFailure};
use crate::Context;

/// Requires the invoking member to hold the configured roles.
pub struct RoleGuard {
    role_ids: Vec<RoleId>,
    require_all: bool,
}

impl RoleGuard {
    pub fn new(require_all: bool, role_ids: Vec<RoleId>) -> Self {
        Self {
            role_ids,
            require_all,
        }
    }
}

#[async_trait]
impl Guard for RoleGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        let Some(member) = ctx.author_member().await else {
            tracing::warn!("while executing RoleGuard, member was not found");
            return Err(GuardFailure::new(
                "While executing RoleGuard, member was not found",
            ));
        };

        decide(&member.roles, &self.role_ids, self.require_all)
    }
}

fn decide(
    held: &[RoleId],
    required: &[RoleId],
    require_all: bool,
) -> Result<(), GuardFailure> {
    let matches = required.iter().filter(|role| held.contains(role)).count();
    let satisfied = if require_all {
        matches == required.len()
    } else {
        matches > 0
    };

    if satisfied {
        Ok(())
    } else {
        Err(GuardFailure::new("You do not have the required roles"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(ids: &[u64]) -> Vec<RoleId> {
        ids.iter().copied().map(RoleId::new).collect()
    }

    #[test]
    fn require_all_needs_every_role() {
        assert!(decide(&roles(&[1, 2]), &roles(&[1, 2]), true).is_ok());
        assert!(decide(&roles(&[1]), &roles(&[1, 2]), true).is_err());
    }

    #[test]
    fn require_any_needs_a_single_role() {
        assert!(decide(&roles(&[2]), &roles(&[1, 2]), false).is_ok());
        assert!(decide(&roles(&[3]), &roles(&[1, 2]), false).is_err());
    }
}
