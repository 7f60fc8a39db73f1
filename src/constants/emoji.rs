use poise::serenity_prelude::{EmojiId, ReactionType};
use std::fmt;

/// A custom guild emoji referenced by id only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CustomEmoji {
    id: u64,
}

impl CustomEmoji {
    pub const fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn emoji_id(&self) -> EmojiId {
        EmojiId::new(self.id)
    }

    pub fn as_reaction(&self) -> ReactionType {
        ReactionType::Custom {
            animated: false,
            id: self.emoji_id(),
            name: None,
        }
    }

    pub fn as_str(&self) -> String {
        format!("<:_:{}>", self.id)
    }
}

impl fmt::Display for CustomEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

pub mod icon {
    use super::CustomEmoji;

    pub const CHECK: CustomEmoji = CustomEmoji::new(1398211404731181067);
    pub const ERROR: CustomEmoji = CustomEmoji::new(1398211406922551391);
    pub const BELL: CustomEmoji = CustomEmoji::new(1398211409183391805);
    pub const CARDS: CustomEmoji = CustomEmoji::new(1398211411510771812);
    pub const CHIP: CustomEmoji = CustomEmoji::new(1398211413926805549);
    pub const TIMER: CustomEmoji = CustomEmoji::new(1398211416254128212);
    pub const CROWN: CustomEmoji = CustomEmoji::new(1398211418527629376);
    pub const GEAR: CustomEmoji = CustomEmoji::new(1398211420847008841);
}
