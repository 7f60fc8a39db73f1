use poise::CreateReply;
use poise::serenity_prelude as serenity;
use serenity::builder::{CreateInteractionResponseMessage, EditMessage};
use serenity::{
    ComponentInteraction, CreateActionRow, CreateAttachment, CreateEmbed, ModalInteraction,
};

use crate::Error;
use crate::errors::MenuError;
use crate::interactive::registry::ComponentKind;

/// The message payload a page produces when (re)rendered.
#[derive(Default, Debug)]
pub struct RenderPayload {
    pub content: Option<String>,
    pub embeds: Vec<CreateEmbed>,
    pub components: Vec<CreateActionRow>,
    pub attachments: Vec<CreateAttachment>,
}

impl RenderPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn components(mut self, components: Vec<CreateActionRow>) -> Self {
        self.components = components;
        self
    }

    pub fn attachment(mut self, attachment: CreateAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn into_reply(self, ephemeral: bool) -> CreateReply {
        let mut reply = CreateReply::default()
            .components(self.components)
            .ephemeral(ephemeral);
        if let Some(content) = self.content {
            reply = reply.content(content);
        }
        for embed in self.embeds {
            reply = reply.embed(embed);
        }
        for attachment in self.attachments {
            reply = reply.attachment(attachment);
        }
        reply
    }

    /// For "update this message in place" interaction responses.
    pub fn into_update(self) -> CreateInteractionResponseMessage {
        let mut response = CreateInteractionResponseMessage::new()
            .embeds(self.embeds)
            .components(self.components);
        if let Some(content) = self.content {
            response = response.content(content);
        }
        for attachment in self.attachments {
            response = response.add_file(attachment);
        }
        response
    }

    pub fn into_edit(self) -> EditMessage {
        let mut edit = EditMessage::new()
            .embeds(self.embeds)
            .components(self.components);
        if let Some(content) = self.content {
            edit = edit.content(content);
        }
        edit
    }
}

/// What a page asks its menu to do once a handler returns.
///
/// Navigation cannot be a method call on the owning menu (the menu is
/// mutably borrowed while the handler runs), so handlers hand back an
/// action and the collector loop applies it between invocations.
pub enum PageAction<S: Send> {
    /// Keep the current page.
    Stay,
    /// Push the current page onto history and install this one.
    Push(Box<dyn MenuPage<S>>),
    /// Pop the previous page from history.
    Back,
    /// End the menu now, running the usual end sequence.
    Stop,
}

/// Handler context: the gateway connection plus the menu's shared state.
///
/// Pages on the history stack hold no reference to the menu or its state;
/// everything arrives borrowed per invocation.
pub struct PageContext<'a, S> {
    pub serenity: &'a serenity::Context,
    pub state: &'a mut S,
}

/// One screen within a menu's page stack.
///
/// `capabilities` is the explicit set of interaction kinds the page
/// supports; the menu checks it before dispatching, so an undeclared kind
/// surfaces as a typed `UnsupportedInteraction` instead of reaching a
/// default handler. State is shared with sibling pages; a page must not
/// assume it is the only one ever hosted by its menu.
#[poise::async_trait]
pub trait MenuPage<S: Send>: Send + Sync {
    fn capabilities(&self) -> &'static [ComponentKind];

    async fn render(&mut self, state: &mut S) -> Result<RenderPayload, Error>;

    async fn handle_button(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::Button).into())
    }

    async fn handle_string_select(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::StringSelect).into())
    }

    async fn handle_user_select(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::UserSelect).into())
    }

    async fn handle_role_select(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::RoleSelect).into())
    }

    async fn handle_mentionable_select(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::MentionableSelect).into())
    }

    async fn handle_channel_select(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ComponentInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::ChannelSelect).into())
    }

    async fn handle_modal(
        &mut self,
        _ctx: PageContext<'_, S>,
        _interaction: &ModalInteraction,
    ) -> Result<PageAction<S>, Error> {
        Err(MenuError::UnsupportedInteraction(ComponentKind::Modal).into())
    }
}
