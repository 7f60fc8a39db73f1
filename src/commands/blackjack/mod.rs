use poise::serenity_prelude as serenity;
use serde::Deserialize;
use serenity::builder::CreateEmbedFooter;
use serenity::{
    ButtonStyle, ChannelType, ComponentInteraction, CreateActionRow, CreateAttachment,
    CreateButton, CreateEmbed, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::functions::ui::component::{send_ephemeral_embed, update_component_message};
use crate::functions::ui::embed::{Palette, error_embed};
use crate::guards::{self, ChannelTypeGuard};
use crate::interactive::registry::ComponentKind;
use crate::interactive::{Menu, MenuPage, PageAction, PageContext, RenderPayload};
use crate::settings::Settings;
use crate::{Context, Error};

mod board;
mod deck;
mod round;

use board::BoardRenderer;
pub use deck::{Deck, DeckPolicy};
use round::{Outcome, Round};

const HIT_ID: &str = "hit";
const STAND_ID: &str = "stand";
const BOARD_FILE: &str = "board.png";
const GAME_THRESHOLD: Duration = Duration::from_secs(60);

const NOT_YOURS: &str = "This component is meant for someone else to execute";

/// The `[blackjack]` section of the settings file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BlackjackConfig {
    pub shoe: bool,
    pub shoe_decks: usize,
    pub assets: String,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            shoe: true,
            shoe_decks: 3,
            assets: "assets/blackjack".to_string(),
        }
    }
}

pub fn config(settings: &Settings) -> BlackjackConfig {
    settings.section("blackjack").unwrap_or_default()
}

/// Deck policy selected by configuration. The shoe is the canonical table;
/// `blackjack.shoe = false` opts into the single-deck variant.
pub fn deck_policy(settings: &Settings) -> DeckPolicy {
    let config = config(settings);
    if config.shoe {
        DeckPolicy::Shoe {
            decks: config.shoe_decks.clamp(1, 8),
        }
    } else {
        DeckPolicy::Single
    }
}

/// Per-user decks that survive between games for the process lifetime.
#[derive(Clone)]
pub struct ShoeStore {
    policy: DeckPolicy,
    decks: Arc<Mutex<HashMap<UserId, Deck>>>,
}

impl ShoeStore {
    pub fn new(policy: DeckPolicy) -> Self {
        Self {
            policy,
            decks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Hands the user their deck, dealing a fresh one on first visit.
    pub fn take(&self, user: UserId) -> Deck {
        self.lock()
            .remove(&user)
            .unwrap_or_else(|| Deck::new(self.policy))
    }

    pub fn put(&self, user: UserId, deck: Deck) {
        self.lock().insert(user, deck);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, Deck>> {
        self.decks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct BlackjackState {
    interactor: serenity::User,
    deck: Deck,
}

/// Play a game of blackjack against the dealer.
#[poise::command(slash_command, prefix_command, guild_only, category = "Games")]
pub async fn blackjack(ctx: Context<'_>) -> Result<(), Error> {
    let table_channels = ChannelTypeGuard::new(vec![ChannelType::Text, ChannelType::PublicThread]);
    if !guards::enforce(&ctx, &[&table_channels]).await? {
        return Ok(());
    }

    let data = ctx.data();
    let palette = Palette::from_settings(&data.settings);
    let renderer = BoardRenderer::new(config(&data.settings).assets);

    let player = ctx.author().clone();
    let mut deck = data.shoes.take(player.id);

    let round = match Round::deal(&mut deck) {
        Some(round) => round,
        None => {
            tracing::warn!("single-deck table exhausted; opening a fresh deck");
            deck = Deck::new(deck.policy());
            match Round::deal(&mut deck) {
                Some(round) => round,
                None => {
                    data.shoes.put(player.id, deck);
                    return Err("failed to deal the opening blackjack hand".into());
                }
            }
        }
    };

    let page = BlackjackPage::new(round, renderer, palette)?;
    let mut menu = Menu::new(BlackjackState {
        interactor: player,
        deck,
    })
    .threshold(GAME_THRESHOLD);
    menu.set_page(Box::new(page));

    menu.start(ctx).await?;

    // The deck carries over to the player's next game.
    let state = menu.into_state();
    data.shoes.put(state.interactor.id, state.deck);

    Ok(())
}

struct BlackjackPage {
    round: Round,
    renderer: BoardRenderer,
    palette: Palette,
    board: Vec<u8>,
}

impl BlackjackPage {
    fn new(round: Round, renderer: BoardRenderer, palette: Palette) -> Result<Self, Error> {
        let board = renderer.compose(&round.player, &round.dealer, true)?;
        Ok(Self {
            round,
            renderer,
            palette,
            board,
        })
    }

    /// Regenerates the board image after a state change; the hole card is
    /// revealed once the round is resolved.
    fn refresh_board(&mut self) {
        match self.renderer.compose(
            &self.round.player,
            &self.round.dealer,
            self.round.in_progress(),
        ) {
            Ok(board) => self.board = board,
            Err(error) => tracing::error!("failed to render the blackjack board: {error}"),
        }
    }

    fn embed_colour(&self) -> serenity::Colour {
        match self.round.outcome() {
            None => self.palette.primary,
            Some(Outcome::Tie) => self.palette.warning,
            Some(outcome) if outcome.player_won() => self.palette.success,
            Some(_) => self.palette.error,
        }
    }

    fn hand_line(cards: &[deck::Card], value: u32) -> String {
        let labels: Vec<String> = cards.iter().map(deck::Card::label).collect();
        format!("{} ({value})", labels.join(" "))
    }

    fn payload(&self, state: &BlackjackState) -> RenderPayload {
        let player_name = state.interactor.display_name();

        let dealer_line = if self.round.in_progress() {
            match self.round.dealer.first() {
                Some(card) => format!("{} 🂠", card.label()),
                None => "🂠 🂠".to_string(),
            }
        } else {
            Self::hand_line(&self.round.dealer, self.round.dealer_value())
        };

        let mut embed = CreateEmbed::new()
            .title("Blackjack")
            .colour(self.embed_colour())
            .description("Use `hit` to draw a card or `stand` to end your turn.")
            .field(
                player_name,
                Self::hand_line(&self.round.player, self.round.player_value()),
                true,
            )
            .field("Dealer", dealer_line, true)
            .image(format!("attachment://{BOARD_FILE}"));

        if let Some(outcome) = self.round.outcome() {
            embed = embed.field("Result", outcome.summary(player_name), false);
        } else if state.deck.remaining() > 0 {
            embed = embed.footer(CreateEmbedFooter::new(format!(
                "{} cards remaining in the deck",
                state.deck.remaining()
            )));
        }

        let buttons = CreateActionRow::Buttons(vec![
            CreateButton::new(HIT_ID)
                .label("Hit")
                .style(ButtonStyle::Secondary)
                .disabled(!self.round.can_hit()),
            CreateButton::new(STAND_ID)
                .label("Stand")
                .style(ButtonStyle::Danger)
                .disabled(!self.round.in_progress()),
        ]);

        RenderPayload::new()
            .embed(embed)
            .components(vec![buttons])
            .attachment(CreateAttachment::bytes(self.board.clone(), BOARD_FILE))
    }
}

#[poise::async_trait]
impl MenuPage<BlackjackState> for BlackjackPage {
    fn capabilities(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Button]
    }

    async fn render(&mut self, state: &mut BlackjackState) -> Result<RenderPayload, Error> {
        Ok(self.payload(state))
    }

    async fn handle_button(
        &mut self,
        ctx: PageContext<'_, BlackjackState>,
        interaction: &ComponentInteraction,
    ) -> Result<PageAction<BlackjackState>, Error> {
        if interaction.user.id != ctx.state.interactor.id {
            send_ephemeral_embed(ctx.serenity, interaction, error_embed(self.palette, NOT_YOURS))
                .await?;
            return Ok(PageAction::Stay);
        }

        match interaction.data.custom_id.as_str() {
            HIT_ID => {
                if !self.round.can_hit() {
                    send_ephemeral_embed(
                        ctx.serenity,
                        interaction,
                        error_embed(self.palette, "You can't take another card right now."),
                    )
                    .await?;
                    return Ok(PageAction::Stay);
                }

                if !self.round.hit(&mut ctx.state.deck) {
                    tracing::warn!("deck ran dry mid-hit; round forfeited to the dealer");
                }
            }
            STAND_ID => {
                if !self.round.in_progress() {
                    send_ephemeral_embed(
                        ctx.serenity,
                        interaction,
                        error_embed(self.palette, "This round is already over."),
                    )
                    .await?;
                    return Ok(PageAction::Stay);
                }

                self.round.stand(&mut ctx.state.deck);
            }
            _ => return Ok(PageAction::Stay),
        }

        self.refresh_board();
        let payload = self.payload(ctx.state);
        update_component_message(ctx.serenity, interaction, payload).await?;

        Ok(PageAction::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoe_store_hands_out_fresh_decks() {
        let store = ShoeStore::new(DeckPolicy::Shoe { decks: 3 });
        let deck = store.take(UserId::new(1));
        assert_eq!(deck.remaining(), 3 * 52);
    }

    #[test]
    fn shoe_store_returns_the_same_deck() {
        let store = ShoeStore::new(DeckPolicy::Single);
        let mut deck = store.take(UserId::new(1));
        deck.draw();
        store.put(UserId::new(1), deck);

        assert_eq!(store.take(UserId::new(1)).remaining(), 51);
    }

    #[test]
    fn deck_policy_defaults_to_a_three_deck_shoe() {
        let settings = Settings::default();
        assert_eq!(deck_policy(&settings), DeckPolicy::Shoe { decks: 3 });
    }

    #[test]
    fn deck_policy_honours_the_single_deck_toggle() {
        let settings = Settings::parse("[blackjack]\nshoe = false").unwrap();
        assert_eq!(deck_policy(&settings), DeckPolicy::Single);
    }

    #[test]
    fn shoe_deck_count_is_clamped() {
        let settings = Settings::parse("[blackjack]\nshoe_decks = 50").unwrap();
        assert_eq!(deck_policy(&settings), DeckPolicy::Shoe { decks: 8 });
    }
}
