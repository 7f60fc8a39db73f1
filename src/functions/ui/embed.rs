use crate::constants::{colors, icon};
use crate::functions::format::pretty_message;
use crate::settings::Settings;
use poise::serenity_prelude::{Colour, CreateEmbed};

/// Embed colours resolved once from settings, with compiled-in fallbacks.
///
/// Pages capture a palette at construction time so they can colour their
/// renders without holding a settings handle.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub primary: Colour,
    pub success: Colour,
    pub error: Colour,
    pub warning: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: colors::FELT,
            success: colors::MINT,
            error: colors::CLARET,
            warning: colors::GOLD,
        }
    }
}

impl Palette {
    pub fn from_settings(settings: &Settings) -> Self {
        let fallback = Self::default();
        Self {
            primary: settings.colour("colors.primary", fallback.primary),
            success: settings.colour("colors.success", fallback.success),
            error: settings.colour("colors.error", fallback.error),
            warning: settings.colour("colors.warning", fallback.warning),
        }
    }
}

pub fn default_embed(palette: Palette) -> CreateEmbed {
    CreateEmbed::new().colour(palette.primary)
}

pub fn success_embed(palette: Palette, message: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .colour(palette.success)
        .description(pretty_message(icon::CHECK, message.into()))
}

pub fn error_embed(palette: Palette, message: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .colour(palette.error)
        .description(pretty_message(icon::ERROR, message.into()))
}
