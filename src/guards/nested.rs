use poise::async_trait;

use super::{Guard, GuardFailure};
use crate::Context;

/// Passes only when every nested guard passes; the first failure wins.
pub struct AndGuard {
    guards: Vec<Box<dyn Guard>>,
}

impl AndGuard {
    pub fn new(guards: Vec<Box<dyn Guard>>) -> Self {
        Self { guards }
    }
}

#[async_trait]
impl Guard for AndGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        for guard in &self.guards {
            guard.check(ctx).await?;
        }
        Ok(())
    }
}

/// Passes when any nested guard passes; otherwise the failures merge into
/// one message.
pub struct OrGuard {
    guards: Vec<Box<dyn Guard>>,
}

impl OrGuard {
    pub fn new(guards: Vec<Box<dyn Guard>>) -> Self {
        Self { guards }
    }
}

#[async_trait]
impl Guard for OrGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<(), GuardFailure> {
        let mut failures = Vec::new();
        for guard in &self.guards {
            match guard.check(ctx).await {
                Ok(()) => return Ok(()),
                Err(failure) => failures.push(failure),
            }
        }
        Err(merge_failures(failures))
    }
}

fn merge_failures(failures: Vec<GuardFailure>) -> GuardFailure {
    if failures.is_empty() {
        return GuardFailure::new("No guards were configured");
    }

    let merged = failures
        .iter()
        .map(GuardFailure::message)
        .collect::<Vec<_>>()
        .join(", or ");
    GuardFailure::new(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merging_joins_messages() {
        let merged = merge_failures(vec![
            GuardFailure::new("missing role"),
            GuardFailure::new("wrong channel"),
        ]);
        assert_eq!(merged.message(), "missing role, or wrong channel");
    }

    #[test]
    fn merging_nothing_still_fails() {
        assert!(!merge_failures(Vec::new()).message().is_empty());
    }
}
