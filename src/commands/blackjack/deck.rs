use rand::seq::SliceRandom;

/// Highest hand value before busting.
pub const BLACKJACK: u32 = 21;
/// The dealer draws until reaching this value.
pub const DEALER_STAND: u32 = 17;

const SHOE_DECKS: usize = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// Aces are worth 1 here; promotion to 11 happens during hand valuation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rank {
    pub name: &'static str,
    pub value: u32,
}

pub const RANKS: [Rank; 13] = [
    Rank { name: "ace", value: 1 },
    Rank { name: "2", value: 2 },
    Rank { name: "3", value: 3 },
    Rank { name: "4", value: 4 },
    Rank { name: "5", value: 5 },
    Rank { name: "6", value: 6 },
    Rank { name: "7", value: 7 },
    Rank { name: "8", value: 8 },
    Rank { name: "9", value: 9 },
    Rank { name: "10", value: 10 },
    Rank { name: "jack", value: 10 },
    Rank { name: "queen", value: 10 },
    Rank { name: "king", value: 10 },
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn is_ace(&self) -> bool {
        self.rank.name == "ace"
    }

    /// File name of this card's sprite in the assets directory.
    pub fn sprite_name(&self) -> String {
        format!("{}_of_{}.png", self.rank.name, self.suit.name())
    }

    /// Short form for embed fields, e.g. `A♠` or `10♥`.
    pub fn label(&self) -> String {
        let rank = match self.rank.name {
            "ace" => "A",
            "jack" => "J",
            "queen" => "Q",
            "king" => "K",
            other => other,
        };
        format!("{rank}{}", self.suit.symbol())
    }
}

/// Standard soft/hard valuation: every card counts its low value, then aces
/// are promoted to 11 one at a time while the total stays at or under 21.
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut total: u32 = hand.iter().map(|card| card.rank.value).sum();
    let mut aces = hand.iter().filter(|card| card.is_ace()).count();

    while aces > 0 && total + 10 <= BLACKJACK {
        total += 10;
        aces -= 1;
    }

    total
}

/// How the table sources its cards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeckPolicy {
    /// One 52-card deck that runs dry; draws return `None` once empty.
    Single,
    /// A multi-deck shoe replaced by a fresh shuffled shoe when a draw
    /// finds it empty.
    Shoe { decks: usize },
}

impl Default for DeckPolicy {
    fn default() -> Self {
        DeckPolicy::Shoe { decks: SHOE_DECKS }
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    policy: DeckPolicy,
}

impl Deck {
    pub fn new(policy: DeckPolicy) -> Self {
        let decks = match policy {
            DeckPolicy::Single => 1,
            DeckPolicy::Shoe { decks } => decks,
        };
        Self {
            cards: build_shuffled(decks),
            policy,
        }
    }

    pub fn policy(&self) -> DeckPolicy {
        self.policy
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Draws from the end of the deck, replenishing first when the policy
    /// is a shoe.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            match self.policy {
                DeckPolicy::Single => return None,
                DeckPolicy::Shoe { decks } => self.cards = build_shuffled(decks),
            }
        }
        self.cards.pop()
    }

    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<Card>, policy: DeckPolicy) -> Self {
        Self { cards, policy }
    }
}

fn build_shuffled(decks: usize) -> Vec<Card> {
    let mut cards = Vec::with_capacity(decks * 52);
    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in RANKS {
                cards.push(Card { suit, rank });
            }
        }
    }

    cards.shuffle(&mut rand::rng());
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank_name: &str) -> Card {
        let rank = RANKS
            .into_iter()
            .find(|rank| rank.name == rank_name)
            .expect("known rank");
        Card {
            suit: Suit::Spades,
            rank,
        }
    }

    #[test]
    fn ace_and_king_is_twenty_one() {
        assert_eq!(hand_value(&[card("ace"), card("king")]), 21);
    }

    #[test]
    fn only_one_ace_gets_promoted() {
        assert_eq!(hand_value(&[card("ace"), card("ace"), card("9")]), 21);
    }

    #[test]
    fn face_cards_bust_without_promotion() {
        assert_eq!(hand_value(&[card("king"), card("queen"), card("5")]), 25);
    }

    #[test]
    fn low_aces_stay_low_when_promotion_would_bust() {
        // 10 + 9 + ace: promoting the ace would reach 30.
        assert_eq!(hand_value(&[card("10"), card("9"), card("ace")]), 20);
    }

    #[test]
    fn empty_hand_is_zero() {
        assert_eq!(hand_value(&[]), 0);
    }

    #[test]
    fn a_shoe_holds_three_decks() {
        let deck = Deck::new(DeckPolicy::default());
        assert_eq!(deck.remaining(), 3 * 52);
    }

    #[test]
    fn a_shoe_replenishes_when_exhausted() {
        let mut deck = Deck::from_cards(Vec::new(), DeckPolicy::Shoe { decks: 1 });
        assert!(deck.draw().is_some());
        assert_eq!(deck.remaining(), 51);
    }

    #[test]
    fn a_single_deck_runs_dry() {
        let mut deck = Deck::from_cards(vec![card("2")], DeckPolicy::Single);
        assert!(deck.draw().is_some());
        assert!(deck.draw().is_none());
    }

    #[test]
    fn sprite_names_follow_rank_of_suit() {
        let card = Card {
            suit: Suit::Hearts,
            rank: RANKS[0],
        };
        assert_eq!(card.sprite_name(), "ace_of_hearts.png");
    }

    #[test]
    fn labels_abbreviate_court_cards() {
        assert_eq!(card("queen").label(), "Q♠");
        assert_eq!(card("10").label(), "10♠");
    }
}
