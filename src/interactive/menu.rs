use poise::serenity_prelude as serenity;
use serenity::builder::EditMessage;
use serenity::collector::{ComponentInteractionCollector, ModalInteractionCollector};
use serenity::{ChannelId, Message, MessageId};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::Error;
use crate::errors::MenuError;
use crate::functions::ui::disable::disable_action_rows;
use crate::interactive::page::{MenuPage, PageAction, PageContext, RenderPayload};
use crate::interactive::registry::{ComponentEvent, ComponentKind};

pub const DEFAULT_MENU_THRESHOLD: Duration = Duration::from_secs(5 * 60);
pub const MAX_MENU_THRESHOLD: Duration = Duration::from_secs(10 * 60);

/// Interaction replies stop being editable after this long; the end-of-menu
/// component disabling is skipped silently once the window has passed.
const EDITABLE_WINDOW_SECS: i64 = 15 * 60;

/// A stateful, multi-page interactive session bound to one rendered message.
///
/// The menu owns exactly one message and one interaction subscription for
/// its whole lifetime: `Created` until [`Menu::start`], then `Started` while
/// the collector loop runs, then `Ended` once the idle threshold elapses or
/// a page requests a stop. There is no way back out of `Ended`.
pub struct Menu<S: Send> {
    state: S,
    threshold: Duration,
    ephemeral: bool,
    page: Option<Box<dyn MenuPage<S>>>,
    history: Vec<Box<dyn MenuPage<S>>>,
    message: Option<Message>,
    stop: Arc<Notify>,
}

/// Lets code outside the collector loop force the end sequence early.
#[derive(Clone)]
pub struct MenuStopHandle {
    stop: Arc<Notify>,
}

impl MenuStopHandle {
    pub fn stop(&self) {
        self.stop.notify_one();
    }
}

impl<S: Send> Menu<S> {
    /// Creates a menu around caller-supplied state shared by all its pages.
    pub fn new(state: S) -> Self {
        Self {
            state,
            threshold: DEFAULT_MENU_THRESHOLD,
            ephemeral: false,
            page: None,
            history: Vec::new(),
            message: None,
            stop: Arc::new(Notify::new()),
        }
    }

    /// Sets the idle timeout, clamped to ten minutes.
    pub fn threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold.min(MAX_MENU_THRESHOLD);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    /// Pushes the currently active page (if any) onto history and installs
    /// the given page as current.
    pub fn set_page(&mut self, page: Box<dyn MenuPage<S>>) -> &mut Self {
        if let Some(current) = self.page.take() {
            self.history.push(current);
        }
        self.page = Some(page);
        self
    }

    /// Reinstates the previous page, discarding the current one.
    pub fn back(&mut self) -> Result<(), MenuError> {
        let previous = self.history.pop().ok_or(MenuError::NoHistory)?;
        self.page = Some(previous);
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Recovers the shared state once the menu has ended.
    pub fn into_state(self) -> S {
        self.state
    }

    pub fn stop_handle(&self) -> MenuStopHandle {
        MenuStopHandle {
            stop: self.stop.clone(),
        }
    }

    /// Renders the current page against the shared state.
    pub async fn render(&mut self) -> Result<RenderPayload, Error> {
        let page = self.page.as_mut().ok_or(MenuError::NoPageSet)?;
        page.render(&mut self.state).await
    }

    /// Sends the initial render as the reply to the triggering interaction,
    /// captures the resulting message, and collects interactions on it until
    /// the idle threshold elapses or a page requests a stop.
    pub async fn start(&mut self, ctx: crate::Context<'_>) -> Result<(), Error> {
        let payload = self.render().await?;
        let reply = ctx.send(payload.into_reply(self.ephemeral)).await?;
        self.message = Some(reply.message().await?.into_owned());

        self.run(ctx.serenity_context()).await
    }

    async fn run(&mut self, ctx: &serenity::Context) -> Result<(), Error> {
        let (channel_id, message_id) = {
            let message = self.message.as_ref().ok_or(MenuError::NotStarted)?;
            (message.channel_id, message.id)
        };

        loop {
            let components = ComponentInteractionCollector::new(ctx)
                .message_id(message_id)
                .timeout(self.threshold)
                .into_future();
            let modals = ModalInteractionCollector::new(ctx)
                .message_id(message_id)
                .timeout(self.threshold)
                .into_future();
            let stop = self.stop.clone();

            let event = tokio::select! {
                _ = stop.notified() => None,
                interaction = components => interaction.map(ComponentEvent::Component),
                submit = modals => submit.map(ComponentEvent::Modal),
            };

            let Some(event) = event else { break };

            if !self.dispatch(ctx, event).await {
                break;
            }

            // The handler may have edited the bound message.
            self.refresh_message(ctx, channel_id, message_id).await;
        }

        self.end(ctx).await;
        Ok(())
    }

    /// Routes one collected interaction to the current page. Returns whether
    /// the collector loop should keep running.
    async fn dispatch(&mut self, ctx: &serenity::Context, event: ComponentEvent) -> bool {
        let Some(kind) = event.kind() else {
            return true;
        };

        let Some(page) = self.page.as_mut() else {
            tracing::error!("menu collected an interaction but no page is set");
            return true;
        };

        if !page.capabilities().contains(&kind) {
            tracing::warn!(
                "{}",
                MenuError::UnsupportedInteraction(kind)
            );
            return true;
        }

        let page_ctx = PageContext {
            serenity: ctx,
            state: &mut self.state,
        };

        let outcome = match (&event, kind) {
            (ComponentEvent::Component(i), ComponentKind::Button) => {
                page.handle_button(page_ctx, i).await
            }
            (ComponentEvent::Component(i), ComponentKind::StringSelect) => {
                page.handle_string_select(page_ctx, i).await
            }
            (ComponentEvent::Component(i), ComponentKind::UserSelect) => {
                page.handle_user_select(page_ctx, i).await
            }
            (ComponentEvent::Component(i), ComponentKind::RoleSelect) => {
                page.handle_role_select(page_ctx, i).await
            }
            (ComponentEvent::Component(i), ComponentKind::MentionableSelect) => {
                page.handle_mentionable_select(page_ctx, i).await
            }
            (ComponentEvent::Component(i), ComponentKind::ChannelSelect) => {
                page.handle_channel_select(page_ctx, i).await
            }
            (ComponentEvent::Modal(m), ComponentKind::Modal) => {
                page.handle_modal(page_ctx, m).await
            }
            _ => return true,
        };

        match outcome {
            Ok(PageAction::Stay) => {}
            Ok(PageAction::Push(next)) => {
                // The pushed page renders lazily on its next interaction.
                self.set_page(next);
            }
            Ok(PageAction::Back) => {
                if let Err(error) = self.back() {
                    tracing::error!("menu back navigation failed: {error}");
                }
            }
            Ok(PageAction::Stop) => return false,
            Err(error) => {
                tracing::error!("failed to execute menu interaction: {error}");
            }
        }

        true
    }

    async fn refresh_message(
        &mut self,
        ctx: &serenity::Context,
        channel_id: ChannelId,
        message_id: MessageId,
    ) {
        match channel_id.message(ctx, message_id).await {
            Ok(refreshed) => self.message = Some(refreshed),
            Err(error) => tracing::debug!("failed to refresh menu message: {error}"),
        }
    }

    /// Terminal state: disable every component on the bound message in
    /// place, skipping silently when the message can no longer be edited.
    async fn end(&mut self, ctx: &serenity::Context) {
        let Some(message) = self.message.as_ref() else {
            return;
        };

        let age_secs = chrono::Utc::now().timestamp() - message.timestamp.unix_timestamp();
        if age_secs >= EDITABLE_WINDOW_SECS {
            return;
        }

        let rows = disable_action_rows(&message.components);
        if let Err(error) = message
            .channel_id
            .edit_message(ctx, message.id, EditMessage::new().components(rows))
            .await
        {
            tracing::warn!("failed to disable menu components: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poise::async_trait;

    struct TaggedPage {
        tag: &'static str,
    }

    #[async_trait]
    impl MenuPage<()> for TaggedPage {
        fn capabilities(&self) -> &'static [ComponentKind] {
            &[ComponentKind::Button]
        }

        async fn render(&mut self, _state: &mut ()) -> Result<RenderPayload, Error> {
            Ok(RenderPayload::new().content(self.tag))
        }
    }

    fn page(tag: &'static str) -> Box<dyn MenuPage<()>> {
        Box::new(TaggedPage { tag })
    }

    #[tokio::test]
    async fn render_without_a_page_is_an_error() {
        let mut menu = Menu::new(());
        let error = menu.render().await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<MenuError>(),
            Some(&MenuError::NoPageSet)
        );
    }

    #[tokio::test]
    async fn back_on_empty_history_is_an_error() {
        let mut menu = Menu::new(());
        menu.set_page(page("a"));
        assert_eq!(menu.back(), Err(MenuError::NoHistory));
    }

    #[tokio::test]
    async fn back_reinstates_the_previous_page() {
        let mut menu = Menu::new(());
        menu.set_page(page("a"));
        menu.set_page(page("b"));
        assert_eq!(menu.history_len(), 1);

        menu.back().unwrap();

        let payload = menu.render().await.unwrap();
        assert_eq!(payload.content.as_deref(), Some("a"));
        assert_eq!(menu.history_len(), 0);
    }

    #[tokio::test]
    async fn set_page_stacks_history_in_order() {
        let mut menu = Menu::new(());
        menu.set_page(page("a"));
        menu.set_page(page("b"));
        menu.set_page(page("c"));
        assert_eq!(menu.history_len(), 2);

        menu.back().unwrap();
        let payload = menu.render().await.unwrap();
        assert_eq!(payload.content.as_deref(), Some("b"));
    }

    #[test]
    fn threshold_is_clamped() {
        let menu = Menu::new(()).threshold(Duration::from_secs(3600));
        assert_eq!(menu.threshold, MAX_MENU_THRESHOLD);
    }
}
