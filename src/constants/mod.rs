pub mod color;
pub mod emoji;

pub mod links {
    pub const GITHUB_REPO: &str = "https://github.com/croupier-bot/croupier";
}

pub mod colors {
    pub use super::color::{CLARET, FELT, GOLD, MINT};
}

pub use emoji::{CustomEmoji, icon};
