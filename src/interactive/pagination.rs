use poise::serenity_prelude as serenity;
use serenity::builder::{CreateInputText, CreateInteractionResponse, CreateModal};
use serenity::{
    ActionRowComponent, ButtonStyle, ComponentInteraction, CreateActionRow, CreateButton,
    CreateEmbed, InputTextStyle, ModalInteraction, UserId,
};

use crate::Error;
use crate::functions::ui::component::send_ephemeral_embed;
use crate::functions::ui::embed::{Palette, error_embed};
use crate::interactive::page::{MenuPage, PageAction, PageContext, RenderPayload};
use crate::interactive::registry::ComponentKind;

const PREV_ID: &str = "page_prev";
const NEXT_ID: &str = "page_next";
const SELECT_ID: &str = "page_select";
const NUMBER_INPUT_ID: &str = "page_number";

const NOT_YOURS: &str = "This component is meant for someone else to execute";

/// A menu page that browses a fixed list of prebuilt embeds.
///
/// Renders prev/next buttons around a "Page x/y" button that opens a modal
/// for jumping straight to a page number. Only the user who opened the menu
/// may navigate.
pub struct PaginationPage {
    interactor: UserId,
    pages: Vec<CreateEmbed>,
    current: usize,
    palette: Palette,
}

impl PaginationPage {
    pub fn new(interactor: UserId, pages: Vec<CreateEmbed>, palette: Palette) -> Self {
        Self {
            interactor,
            pages,
            current: 0,
            palette,
        }
    }

    fn payload(&self) -> RenderPayload {
        let embed = self
            .pages
            .get(self.current)
            .cloned()
            .unwrap_or_default()
            .colour(self.palette.primary);

        RenderPayload::new()
            .embed(embed)
            .components(vec![self.navigation_row()])
    }

    fn navigation_row(&self) -> CreateActionRow {
        let last_index = self.pages.len().saturating_sub(1);
        CreateActionRow::Buttons(vec![
            CreateButton::new(PREV_ID)
                .emoji('⬅')
                .style(ButtonStyle::Primary)
                .disabled(self.current == 0),
            CreateButton::new(SELECT_ID)
                .label(format!("Page {}/{}", self.current + 1, self.pages.len()))
                .style(ButtonStyle::Secondary),
            CreateButton::new(NEXT_ID)
                .emoji('➡')
                .style(ButtonStyle::Primary)
                .disabled(self.current >= last_index),
        ])
    }

    fn page_select_modal(&self) -> CreateModal {
        let digits = self.pages.len().to_string().len() as u16;
        let input = CreateInputText::new(InputTextStyle::Short, "Page Number", NUMBER_INPUT_ID)
            .placeholder("Enter a page number...")
            .required(true)
            .min_length(1)
            .max_length(digits);

        CreateModal::new(SELECT_ID, "Select Page")
            .components(vec![CreateActionRow::InputText(input)])
    }

    /// Maps 1-based user input to a page index, rejecting out-of-range values.
    fn parse_page_number(&self, raw: &str) -> Option<usize> {
        let number: usize = raw.trim().parse().ok()?;
        (1..=self.pages.len()).contains(&number).then(|| number - 1)
    }
}

fn modal_input_value<'a>(interaction: &'a ModalInteraction, custom_id: &str) -> Option<&'a str> {
    for row in &interaction.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                if input.custom_id == custom_id {
                    return input.value.as_deref();
                }
            }
        }
    }
    None
}

#[poise::async_trait]
impl<S: Send + Sync> MenuPage<S> for PaginationPage {
    fn capabilities(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Button, ComponentKind::Modal]
    }

    async fn render(&mut self, _state: &mut S) -> Result<RenderPayload, Error> {
        Ok(self.payload())
    }

    async fn handle_button(
        &mut self,
        ctx: PageContext<'_, S>,
        interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        if interaction.user.id != self.interactor {
            send_ephemeral_embed(ctx.serenity, interaction, error_embed(self.palette, NOT_YOURS))
                .await?;
            return Ok(PageAction::Stay);
        }

        match interaction.data.custom_id.as_str() {
            SELECT_ID => {
                interaction
                    .create_response(
                        ctx.serenity,
                        CreateInteractionResponse::Modal(self.page_select_modal()),
                    )
                    .await?;
                return Ok(PageAction::Stay);
            }
            PREV_ID => self.current = self.current.saturating_sub(1),
            NEXT_ID => {
                let last_index = self.pages.len().saturating_sub(1);
                self.current = (self.current + 1).min(last_index);
            }
            _ => return Ok(PageAction::Stay),
        }

        interaction
            .create_response(
                ctx.serenity,
                CreateInteractionResponse::UpdateMessage(self.payload().into_update()),
            )
            .await?;
        Ok(PageAction::Stay)
    }

    async fn handle_modal(
        &mut self,
        ctx: PageContext<'_, S>,
        interaction: &ModalInteraction,
    ) -> Result<PageAction<S>, Error> {
        let raw = modal_input_value(interaction, NUMBER_INPUT_ID).unwrap_or_default();

        let Some(index) = self.parse_page_number(raw) else {
            let message = format!(
                "Invalid page number. Please enter a number between 1 and {}.",
                self.pages.len()
            );
            interaction
                .create_response(
                    ctx.serenity,
                    CreateInteractionResponse::Message(
                        serenity::builder::CreateInteractionResponseMessage::new()
                            .embed(error_embed(self.palette, message))
                            .ephemeral(true),
                    ),
                )
                .await?;
            return Ok(PageAction::Stay);
        };

        self.current = index;
        interaction
            .create_response(
                ctx.serenity,
                CreateInteractionResponse::UpdateMessage(self.payload().into_update()),
            )
            .await?;
        Ok(PageAction::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(pages: usize) -> PaginationPage {
        let embeds = (0..pages).map(|_| CreateEmbed::new()).collect();
        PaginationPage::new(UserId::new(1), embeds, Palette::default())
    }

    #[test]
    fn page_numbers_validate_against_bounds() {
        let page = pagination(5);
        assert_eq!(page.parse_page_number("1"), Some(0));
        assert_eq!(page.parse_page_number("5"), Some(4));
        assert_eq!(page.parse_page_number("0"), None);
        assert_eq!(page.parse_page_number("6"), None);
        assert_eq!(page.parse_page_number("abc"), None);
    }

    #[test]
    fn payload_carries_one_embed_and_the_navigation_row() {
        let page = pagination(3);
        let payload = page.payload();
        assert_eq!(payload.embeds.len(), 1);
        assert_eq!(payload.components.len(), 1);
    }
}
