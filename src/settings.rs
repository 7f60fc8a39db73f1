use crate::env;
use crate::errors::SettingsError;
use poise::serenity_prelude::Colour;
use serde::de::DeserializeOwned;
use std::path::Path;

const DEFAULT_SETTINGS_FILE: &str = "croupier.toml";

/// Key-based accessor over the optional `croupier.toml` settings file.
///
/// Keys are dotted paths into the TOML tree, e.g. `colors.primary` or
/// `blackjack.shoe`. A missing file yields an empty tree, so every lookup
/// falls back to its compiled-in default.
#[derive(Clone, Debug)]
pub struct Settings {
    root: toml::Value,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: toml::Value::Table(toml::map::Map::new()),
        }
    }
}

impl Settings {
    /// Loads settings from `CROUPIER_SETTINGS` or `croupier.toml` when present
    pub fn load() -> Result<Self, SettingsError> {
        let path = env::settings_path()
            .map_err(|err| SettingsError::Env(err.to_string()))?
            .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());

        if !Path::new(&path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let root = content.parse::<toml::Value>()?;
        Ok(Self { root })
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.node(key)?.as_str()
    }

    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.string(key).unwrap_or(default)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.node(key)?.as_bool()
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.boolean(key).unwrap_or(default)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.node(key)?.as_integer()
    }

    pub fn integer_or(&self, key: &str, default: i64) -> i64 {
        self.integer(key).unwrap_or(default)
    }

    /// Parses a `#RRGGBB` string setting into a colour, keeping the fallback
    /// when the key is absent or malformed.
    pub fn colour(&self, key: &str, fallback: Colour) -> Colour {
        self.string(key)
            .and_then(parse_hex_colour)
            .unwrap_or(fallback)
    }

    /// Deserializes a whole section (e.g. `blackjack`) into a typed struct.
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.node(key).cloned().and_then(|value| value.try_into().ok())
    }

    fn node(&self, key: &str) -> Option<&toml::Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}

fn parse_hex_colour(raw: &str) -> Option<Colour> {
    let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Colour::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        [colors]
        primary = "#35654D"

        [blackjack]
        shoe = false
        shoe_decks = 2
    "##;

    #[test]
    fn dotted_lookups_resolve() {
        let settings = Settings::parse(SAMPLE).unwrap();
        assert_eq!(settings.string("colors.primary"), Some("#35654D"));
        assert_eq!(settings.boolean("blackjack.shoe"), Some(false));
        assert_eq!(settings.integer("blackjack.shoe_decks"), Some(2));
    }

    #[test]
    fn missing_keys_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.string("colors.primary"), None);
        assert!(settings.bool_or("blackjack.shoe", true));
        assert_eq!(settings.integer_or("blackjack.shoe_decks", 3), 3);
    }

    #[test]
    fn colour_parsing() {
        let settings = Settings::parse(SAMPLE).unwrap();
        let fallback = Colour::new(0x000000);
        assert_eq!(settings.colour("colors.primary", fallback).0, 0x35654D);
        assert_eq!(settings.colour("colors.missing", fallback), fallback);
    }

    #[test]
    fn malformed_colour_keeps_fallback() {
        let settings = Settings::parse("[colors]\nprimary = \"teal\"").unwrap();
        let fallback = Colour::new(0xABCDEF);
        assert_eq!(settings.colour("colors.primary", fallback), fallback);
    }
}
