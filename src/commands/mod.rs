use crate::{Data, Error};

pub mod blackjack;
pub mod help;
pub mod ping;

pub fn load_all() -> Vec<poise::Command<Data, Error>> {
    vec![blackjack::blackjack(), help::help(), ping::ping()]
}
