//! Croupier - a Discord bot that deals blackjack.
//!
//! The crate splits into a small framework layer (time-boxed interactive
//! components, a paged menu engine, guard predicates) and the features
//! built on top of it. All state is in-memory; nothing survives a restart.

pub mod bot;
pub mod commands;
pub mod constants;
pub mod env;
pub mod errors;
pub mod events;
pub mod functions;
pub mod guards;
pub mod interactive;
pub mod settings;

pub use bot::{Context, Data, Error};
