use poise::BoxFuture;
use poise::serenity_prelude as serenity;
use serenity::{ComponentInteraction, ComponentInteractionDataKind, ModalInteraction, UserId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::Error;
use crate::interactive::id;

pub const DEFAULT_EXECUTION_THRESHOLD: Duration = Duration::from_secs(5 * 60);
pub const MAX_EXECUTION_THRESHOLD: Duration = Duration::from_secs(10 * 60);

/// The interaction kinds a registration or menu page can bind to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComponentKind {
    Button,
    StringSelect,
    UserSelect,
    RoleSelect,
    MentionableSelect,
    ChannelSelect,
    Modal,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Button => "button",
            Self::StringSelect => "string select menu",
            Self::UserSelect => "user select menu",
            Self::RoleSelect => "role select menu",
            Self::MentionableSelect => "mentionable select menu",
            Self::ChannelSelect => "channel select menu",
            Self::Modal => "modal",
        };
        f.write_str(name)
    }
}

/// An inbound interaction that component handlers receive.
///
/// Buttons and every select menu flavour arrive as component interactions;
/// modal submits arrive separately, so both are folded into one event type
/// for uniform dispatch.
#[derive(Clone, Debug)]
pub enum ComponentEvent {
    Component(ComponentInteraction),
    Modal(ModalInteraction),
}

impl ComponentEvent {
    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            Self::Component(interaction) => Some(match &interaction.data.kind {
                ComponentInteractionDataKind::Button => ComponentKind::Button,
                ComponentInteractionDataKind::StringSelect { .. } => ComponentKind::StringSelect,
                ComponentInteractionDataKind::UserSelect { .. } => ComponentKind::UserSelect,
                ComponentInteractionDataKind::RoleSelect { .. } => ComponentKind::RoleSelect,
                ComponentInteractionDataKind::MentionableSelect { .. } => {
                    ComponentKind::MentionableSelect
                }
                ComponentInteractionDataKind::ChannelSelect { .. } => ComponentKind::ChannelSelect,
                ComponentInteractionDataKind::Unknown(_) => return None,
            }),
            Self::Modal(_) => Some(ComponentKind::Modal),
        }
    }

    pub fn custom_id(&self) -> &str {
        match self {
            Self::Component(interaction) => &interaction.data.custom_id,
            Self::Modal(interaction) => &interaction.data.custom_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Self::Component(interaction) => interaction.user.id,
            Self::Modal(interaction) => interaction.user.id,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentInteraction> {
        match self {
            Self::Component(interaction) => Some(interaction),
            Self::Modal(_) => None,
        }
    }

    pub fn as_modal(&self) -> Option<&ModalInteraction> {
        match self {
            Self::Modal(interaction) => Some(interaction),
            Self::Component(_) => None,
        }
    }
}

pub type ExecuteFn = dyn for<'a> Fn(
        &'a serenity::Context,
        &'a ComponentEvent,
        StopHandle,
    ) -> BoxFuture<'a, Result<(), Error>>
    + Send
    + Sync;

pub type ExpireFn = dyn FnOnce(String) -> BoxFuture<'static, ()> + Send + Sync;

/// Registration options for a time-boxed interactive component.
pub struct ComponentHandler {
    pub kind: ComponentKind,
    pub on_execute: Arc<ExecuteFn>,
    pub on_expire: Option<Box<ExpireFn>>,
    pub allowed_executor_ids: Vec<UserId>,
    pub execution_threshold: Duration,
    pub renew_on_interact: bool,
}

impl ComponentHandler {
    pub fn new(kind: ComponentKind, on_execute: Arc<ExecuteFn>) -> Self {
        Self {
            kind,
            on_execute,
            on_expire: None,
            allowed_executor_ids: Vec::new(),
            execution_threshold: DEFAULT_EXECUTION_THRESHOLD,
            renew_on_interact: false,
        }
    }

    pub fn on_expire(mut self, on_expire: Box<ExpireFn>) -> Self {
        self.on_expire = Some(on_expire);
        self
    }

    /// Restricts execution to the given users; an empty list means anyone.
    pub fn allow_user(mut self, user: UserId) -> Self {
        self.allowed_executor_ids.push(user);
        self
    }

    pub fn execution_threshold(mut self, threshold: Duration) -> Self {
        self.execution_threshold = threshold;
        self
    }

    pub fn renew_on_interact(mut self, renew: bool) -> Self {
        self.renew_on_interact = renew;
        self
    }
}

/// A live registration. The timer handle is the single scheduled expiry
/// task; renewing aborts it and schedules a replacement.
struct Registration {
    allowed_executor_ids: Vec<UserId>,
    execution_threshold: Duration,
    renew_on_interact: bool,
    timer: JoinHandle<()>,
    on_execute: Arc<ExecuteFn>,
    on_expire: Option<Box<ExpireFn>>,
}

/// The executable view of a registration handed to the dispatcher.
pub struct ResolvedComponent {
    pub allowed_executor_ids: Vec<UserId>,
    pub execution_threshold: Duration,
    pub renew_on_interact: bool,
    pub on_execute: Arc<ExecuteFn>,
}

type RegistryKey = (String, ComponentKind);

/// Process-wide mapping from `(custom id, kind)` to live registrations.
///
/// Cheap to clone; every clone shares the same map. Constructed once at
/// startup and injected through `Data`; tests build their own instances.
/// Callbacks and awaits never run while the map lock is held.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    entries: Arc<Mutex<HashMap<RegistryKey, Registration>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler and returns the custom id to attach to the
    /// rendered component. The execution threshold is clamped to ten
    /// minutes; the expiry timer starts immediately.
    pub fn register(&self, handler: ComponentHandler) -> String {
        let custom_id = id::generate("cmp");
        let threshold = handler.execution_threshold.min(MAX_EXECUTION_THRESHOLD);

        // The timer is scheduled with the map locked so it cannot fire
        // before the record lands, even with a zero threshold.
        let mut entries = self.lock();
        let timer = self.schedule_expiry(custom_id.clone(), handler.kind, threshold);
        entries.insert(
            (custom_id.clone(), handler.kind),
            Registration {
                allowed_executor_ids: handler.allowed_executor_ids,
                execution_threshold: threshold,
                renew_on_interact: handler.renew_on_interact,
                timer,
                on_execute: handler.on_execute,
                on_expire: handler.on_expire,
            },
        );

        custom_id
    }

    /// Resolves an inbound `(id, kind)` pair to its executable view, or
    /// `None` for expired/foreign identifiers.
    pub fn lookup(&self, custom_id: &str, kind: ComponentKind) -> Option<ResolvedComponent> {
        let entries = self.lock();
        let registration = entries.get(&(custom_id.to_owned(), kind))?;
        Some(ResolvedComponent {
            allowed_executor_ids: registration.allowed_executor_ids.clone(),
            execution_threshold: registration.execution_threshold,
            renew_on_interact: registration.renew_on_interact,
            on_execute: registration.on_execute.clone(),
        })
    }

    pub fn is_registered(&self, custom_id: &str, kind: ComponentKind) -> bool {
        self.lock().contains_key(&(custom_id.to_owned(), kind))
    }

    /// Removes a registration and cancels its pending timer without firing
    /// `on_expire`.
    pub fn remove(&self, custom_id: &str, kind: ComponentKind) -> bool {
        match self.lock().remove(&(custom_id.to_owned(), kind)) {
            Some(registration) => {
                registration.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Ends a registration now: cancels the timer, fires `on_expire`, and
    /// removes the record. A second call for the same id is a no-op, so the
    /// natural-expiry/explicit-stop race is harmless.
    pub async fn stop(&self, custom_id: &str, kind: ComponentKind) {
        let removed = self.lock().remove(&(custom_id.to_owned(), kind));
        if let Some(registration) = removed {
            registration.timer.abort();
            if let Some(on_expire) = registration.on_expire {
                on_expire(custom_id.to_owned()).await;
            }
        }
    }

    /// Resets the expiry timer of a renewable registration back to its full
    /// threshold.
    pub fn renew(&self, custom_id: &str, kind: ComponentKind) -> bool {
        let mut entries = self.lock();
        let Some(registration) = entries.get_mut(&(custom_id.to_owned(), kind)) else {
            return false;
        };

        registration.timer.abort();
        registration.timer =
            self.schedule_expiry(custom_id.to_owned(), kind, registration.execution_threshold);
        true
    }

    /// Applies the post-invocation lifecycle step: renew the timer for
    /// renewable registrations, consume everything else. Does nothing when
    /// the handler already stopped the registration itself.
    pub async fn settle(&self, custom_id: &str, kind: ComponentKind, renew_on_interact: bool) {
        if !self.is_registered(custom_id, kind) {
            return;
        }

        if renew_on_interact {
            self.renew(custom_id, kind);
        } else {
            self.stop(custom_id, kind).await;
        }
    }

    pub fn stop_handle(&self, custom_id: impl Into<String>, kind: ComponentKind) -> StopHandle {
        StopHandle {
            registry: self.clone(),
            custom_id: custom_id.into(),
            kind,
        }
    }

    fn schedule_expiry(
        &self,
        custom_id: String,
        kind: ComponentKind,
        threshold: Duration,
    ) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(threshold).await;
            registry.expire(custom_id, kind).await;
        })
    }

    /// Natural expiry path, run by the timer task itself. The record is
    /// taken out without aborting the timer (that would cancel the very
    /// task running this) and `on_expire` fires outside the lock.
    async fn expire(&self, custom_id: String, kind: ComponentKind) {
        let removed = self.lock().remove(&(custom_id.clone(), kind));
        if let Some(registration) = removed {
            if let Some(on_expire) = registration.on_expire {
                on_expire(custom_id).await;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RegistryKey, Registration>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Capability handed to handlers for ending interactivity immediately.
#[derive(Clone)]
pub struct StopHandle {
    registry: ComponentRegistry,
    custom_id: String,
    kind: ComponentKind,
}

impl StopHandle {
    /// Cancels the timer, fires `on_expire`, and deletes the registration.
    /// Calling it more than once is a no-op.
    pub async fn stop(&self) {
        self.registry.stop(&self.custom_id, self.kind).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handler(kind: ComponentKind) -> ComponentHandler {
        ComponentHandler::new(kind, Arc::new(|_ctx, _event, _stop| Box::pin(async { Ok(()) })))
    }

    fn expiry_counter(handler: ComponentHandler, counter: Arc<AtomicUsize>) -> ComponentHandler {
        handler.on_expire(Box::new(move |_id| {
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        }))
    }

    async fn advance(duration: Duration) {
        tokio::time::sleep(duration).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn register_then_lookup_roundtrip() {
        let registry = ComponentRegistry::new();
        let custom_id = registry.register(handler(ComponentKind::Button));

        assert!(registry.lookup(&custom_id, ComponentKind::Button).is_some());
        // A different kind under the same id is a different registration.
        assert!(registry.lookup(&custom_id, ComponentKind::Modal).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn threshold_is_clamped_to_ten_minutes() {
        let registry = ComponentRegistry::new();
        let custom_id = registry.register(
            handler(ComponentKind::Button).execution_threshold(Duration::from_secs(3600)),
        );

        let resolved = registry.lookup(&custom_id, ComponentKind::Button).unwrap();
        assert_eq!(resolved.execution_threshold, MAX_EXECUTION_THRESHOLD);
    }

    #[tokio::test(start_paused = true)]
    async fn natural_expiry_removes_and_fires_on_expire() {
        let registry = ComponentRegistry::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let custom_id = registry.register(expiry_counter(
            handler(ComponentKind::Button).execution_threshold(Duration::from_secs(5)),
            expired.clone(),
        ));

        advance(Duration::from_secs(6)).await;

        assert!(registry.lookup(&custom_id, ComponentKind::Button).is_none());
        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_cancels_the_timer_without_firing() {
        let registry = ComponentRegistry::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let custom_id = registry.register(expiry_counter(
            handler(ComponentKind::StringSelect).execution_threshold(Duration::from_secs(5)),
            expired.clone(),
        ));

        assert!(registry.remove(&custom_id, ComponentKind::StringSelect));
        advance(Duration::from_secs(10)).await;

        assert!(registry.lookup(&custom_id, ComponentKind::StringSelect).is_none());
        assert_eq!(expired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn renewal_resets_elapsed_idle_time() {
        let registry = ComponentRegistry::new();
        let custom_id = registry.register(
            handler(ComponentKind::Button)
                .execution_threshold(Duration::from_secs(5))
                .renew_on_interact(true),
        );

        advance(Duration::from_secs(3)).await;
        assert!(registry.renew(&custom_id, ComponentKind::Button));

        // Past the original deadline, before the renewed one.
        advance(Duration::from_secs(3)).await;
        assert!(registry.is_registered(&custom_id, ComponentKind::Button));

        advance(Duration::from_secs(3)).await;
        assert!(!registry.is_registered(&custom_id, ComponentKind::Button));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let registry = ComponentRegistry::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let custom_id = registry.register(expiry_counter(
            handler(ComponentKind::Button),
            expired.clone(),
        ));

        let stop = registry.stop_handle(custom_id.clone(), ComponentKind::Button);
        stop.stop().await;
        stop.stop().await;

        assert!(!registry.is_registered(&custom_id, ComponentKind::Button));
        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_consumes_non_renewing_registrations() {
        let registry = ComponentRegistry::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let custom_id = registry.register(expiry_counter(
            handler(ComponentKind::Button),
            expired.clone(),
        ));

        registry.settle(&custom_id, ComponentKind::Button, false).await;

        assert!(!registry.is_registered(&custom_id, ComponentKind::Button));
        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_keeps_renewing_registrations_alive() {
        let registry = ComponentRegistry::new();
        let custom_id = registry.register(
            handler(ComponentKind::Button)
                .execution_threshold(Duration::from_secs(5))
                .renew_on_interact(true),
        );

        advance(Duration::from_secs(3)).await;
        registry.settle(&custom_id, ComponentKind::Button, true).await;

        advance(Duration::from_secs(3)).await;
        assert!(registry.is_registered(&custom_id, ComponentKind::Button));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_after_handler_stop_is_a_no_op() {
        let registry = ComponentRegistry::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let custom_id = registry.register(expiry_counter(
            handler(ComponentKind::Button),
            expired.clone(),
        ));

        registry.stop(&custom_id, ComponentKind::Button).await;
        registry.settle(&custom_id, ComponentKind::Button, false).await;

        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }
}
