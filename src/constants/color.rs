use poise::serenity_prelude::Colour;

/// Table-green used while a round is live.
pub const FELT: Colour = Colour::new(0x35654D);
/// Payout green.
pub const MINT: Colour = Colour::new(0x57B894);
/// House-wins red.
pub const CLARET: Colour = Colour::new(0xB33A3A);
/// Push/tie amber.
pub const GOLD: Colour = Colour::new(0xD9A441);
