use std::fmt::Display;

/// Builds a lightweight "emoji | message" string used across embeds/responses.
pub fn pretty_message(emoji: impl Display, message: impl Display) -> String {
    format!("{} | {}", emoji, message)
}

/// Helper functions to format Discord messages with Markdown safely.
pub mod discord {
    use poise::serenity_prelude::UserId;
    use poise::serenity_prelude::utils::MessageBuilder;

    /// Formats a raw Discord user mention (`<@id>`).
    pub fn mention(id: u64) -> String {
        build(|builder| {
            let user_id = UserId::new(id);
            builder.mention(&user_id);
        })
    }

    /// Wraps text with Discord's inline bold formatting (`**text**`).
    pub fn bold(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_bold_safe(text.as_ref());
        })
    }

    /// Wraps text with inline code markers (`` `text` ``).
    pub fn inline_code(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_mono_safe(text.as_ref());
        })
    }

    /// Returns a normalized version of the input without adding formatting.
    pub fn escape(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_safe(text.as_ref());
        })
    }

    fn build(apply: impl FnOnce(&mut MessageBuilder)) -> String {
        let mut builder = MessageBuilder::new();
        apply(&mut builder);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_message_joins_with_pipe() {
        assert_eq!(pretty_message("🃏", "dealt"), "🃏 | dealt");
    }

    #[test]
    fn mention_formats_user_id() {
        assert_eq!(discord::mention(42), "<@42>");
    }
}
