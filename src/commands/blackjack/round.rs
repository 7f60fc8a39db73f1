use super::deck::{BLACKJACK, Card, DEALER_STAND, Deck, hand_value};

/// Terminal result of a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Tie,
}

impl Outcome {
    /// The overlay/summary text shown when the round ends.
    pub fn summary(self, player_name: &str) -> String {
        match self {
            Outcome::PlayerBust => format!("Dealer wins\n{player_name} busted"),
            Outcome::DealerBust => format!("Dealer busted\n{player_name} wins"),
            Outcome::PlayerWin => format!("{player_name} wins"),
            Outcome::DealerWin => "Dealer wins".to_string(),
            Outcome::Tie => "It's a tie!".to_string(),
        }
    }

    pub fn player_won(self) -> bool {
        matches!(self, Outcome::DealerBust | Outcome::PlayerWin)
    }
}

/// One blackjack round: two hands and, eventually, an outcome.
#[derive(Clone, Debug)]
pub struct Round {
    pub player: Vec<Card>,
    pub dealer: Vec<Card>,
    outcome: Option<Outcome>,
}

impl Round {
    /// Deals two cards to each side. `None` when the deck cannot cover the
    /// opening deal (single-deck policy run dry).
    pub fn deal(deck: &mut Deck) -> Option<Self> {
        let player = vec![deck.draw()?, deck.draw()?];
        let dealer = vec![deck.draw()?, deck.draw()?];
        Some(Self {
            player,
            dealer,
            outcome: None,
        })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn in_progress(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn player_value(&self) -> u32 {
        hand_value(&self.player)
    }

    pub fn dealer_value(&self) -> u32 {
        hand_value(&self.dealer)
    }

    /// Hit is never offered at exactly 21; standing is the only move left.
    pub fn can_hit(&self) -> bool {
        self.in_progress() && self.player_value() < BLACKJACK
    }

    /// Draws one card into the player hand. Busting past 21 ends the round.
    /// Returns `false` when the deck ran dry, which forfeits the round to
    /// the dealer.
    pub fn hit(&mut self, deck: &mut Deck) -> bool {
        if !self.can_hit() {
            return true;
        }

        let Some(card) = deck.draw() else {
            self.outcome = Some(Outcome::DealerWin);
            return false;
        };

        self.player.push(card);
        if self.player_value() > BLACKJACK {
            self.outcome = Some(Outcome::PlayerBust);
        }
        true
    }

    /// Ends the player's turn: the dealer draws to 17, then the hands are
    /// compared. The loop terminates because the deck is finite or
    /// replenished whole.
    pub fn stand(&mut self, deck: &mut Deck) {
        if !self.in_progress() {
            return;
        }

        while self.dealer_value() < DEALER_STAND {
            match deck.draw() {
                Some(card) => self.dealer.push(card),
                None => break,
            }
        }

        let player = self.player_value();
        let dealer = self.dealer_value();

        self.outcome = Some(if player > BLACKJACK {
            Outcome::PlayerBust
        } else if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if player > dealer {
            Outcome::PlayerWin
        } else if player < dealer {
            Outcome::DealerWin
        } else {
            Outcome::Tie
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::blackjack::deck::{DeckPolicy, RANKS, Suit};

    fn card(rank_name: &str) -> Card {
        let rank = RANKS
            .into_iter()
            .find(|rank| rank.name == rank_name)
            .expect("known rank");
        Card {
            suit: Suit::Clubs,
            rank,
        }
    }

    fn fixed_deck(rank_names: &[&str]) -> Deck {
        // Draws come from the end of the vector.
        let cards = rank_names.iter().rev().map(|name| card(name)).collect();
        Deck::from_cards(cards, DeckPolicy::Single)
    }

    fn round(player: &[&str], dealer: &[&str]) -> Round {
        Round {
            player: player.iter().map(|name| card(name)).collect(),
            dealer: dealer.iter().map(|name| card(name)).collect(),
            outcome: None,
        }
    }

    #[test]
    fn standing_on_seventeen_loses_to_dealer_eighteen() {
        let mut deck = fixed_deck(&[]);
        let mut game = round(&["10", "7"], &["9", "9"]);

        game.stand(&mut deck);

        assert_eq!(game.outcome(), Some(Outcome::DealerWin));
        let summary = Outcome::DealerWin.summary("Player");
        assert!(summary.contains("Dealer wins"));
        assert!(!summary.contains("busted"));
    }

    #[test]
    fn dealer_draws_to_seventeen_or_busts() {
        let mut deck = fixed_deck(&["2", "3", "10", "10", "10"]);
        let mut game = round(&["10", "9"], &["2", "2"]);

        game.stand(&mut deck);

        let dealer = game.dealer_value();
        assert!(dealer >= DEALER_STAND || dealer > BLACKJACK);
        assert!(game.outcome().is_some());
    }

    #[test]
    fn hitting_past_twenty_one_busts_the_player() {
        let mut deck = fixed_deck(&["10"]);
        let mut game = round(&["10", "7"], &["9", "9"]);

        assert!(game.hit(&mut deck));

        assert_eq!(game.outcome(), Some(Outcome::PlayerBust));
        assert!(game.summary_mentions_bust());
    }

    #[test]
    fn hit_is_rejected_at_twenty_one() {
        let mut deck = fixed_deck(&["10"]);
        let mut game = round(&["ace", "king"], &["9", "9"]);

        assert!(!game.can_hit());
        game.hit(&mut deck);
        assert_eq!(game.player.len(), 2);
        assert!(game.in_progress());
    }

    #[test]
    fn equal_values_tie() {
        let mut deck = fixed_deck(&[]);
        let mut game = round(&["10", "8"], &["9", "9"]);

        game.stand(&mut deck);
        assert_eq!(game.outcome(), Some(Outcome::Tie));
    }

    #[test]
    fn dealer_bust_pays_the_player() {
        let mut deck = fixed_deck(&["10"]);
        let mut game = round(&["10", "8"], &["10", "6"]);

        game.stand(&mut deck);
        assert_eq!(game.outcome(), Some(Outcome::DealerBust));
        assert!(Outcome::DealerBust.player_won());
    }

    #[test]
    fn running_dry_mid_hit_forfeits_to_the_dealer() {
        let mut deck = fixed_deck(&[]);
        let mut game = round(&["2", "3"], &["9", "9"]);

        assert!(!game.hit(&mut deck));
        assert_eq!(game.outcome(), Some(Outcome::DealerWin));
    }

    impl Round {
        fn summary_mentions_bust(&self) -> bool {
            self.outcome()
                .map(|outcome| outcome.summary("Player").contains("busted"))
                .unwrap_or(false)
        }
    }
}
