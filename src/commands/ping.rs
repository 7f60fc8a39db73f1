use crate::{Context, Error};
use std::time::Instant;

/// Check the table's reaction time 🃏
#[poise::command(slash_command, prefix_command, guild_only, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let start = Instant::now();

    let msg = ctx.say("🃏 Shuffling...").await?;
    let elapsed = start.elapsed();

    let manager = ctx.data().shard_manager.clone();
    let runners = manager.runners.lock().await;
    let shard_id = ctx.serenity_context().shard_id;
    let latency = runners
        .get(&shard_id)
        .and_then(|runner| runner.latency)
        .unwrap_or_default();

    msg.edit(
        ctx,
        poise::CreateReply::default().content(format!(
            "🃏 Cards on the table!\nWebSocket latency: {} ms\nAPI latency: {} ms",
            latency.as_millis(),
            elapsed.as_millis()
        )),
    )
    .await?;

    Ok(())
}
