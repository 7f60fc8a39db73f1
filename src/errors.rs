use crate::interactive::ComponentKind;
use thiserror::Error;

/// Menu misuse surfaces as one of these instead of panicking mid-session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("there is no page to go back to")]
    NoHistory,

    #[error("no page is set for the menu")]
    NoPageSet,

    #[error("the menu has not been started")]
    NotStarted,

    #[error("{0} interactions are not supported by the current menu page")]
    UnsupportedInteraction(ComponentKind),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read settings environment: {0}")]
    Env(String),
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("failed to encode the board image: {0}")]
    Encode(#[from] image::ImageError),
}
