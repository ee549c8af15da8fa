//! Topic-based synchronous event bus.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::query::Queries;
use super::types::{
    CharacterEvent, HomeEvent, InventoryEvent, MailEvent, PersistenceEvent, SettingsEvent,
    ShopEvent, ViewEvent, WalletEvent,
};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    View,
    Shop,
    Mail,
    Character,
    Inventory,
    Wallet,
    Settings,
    Home,
    Persistence,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    View(ViewEvent),
    Shop(ShopEvent),
    Mail(MailEvent),
    Character(CharacterEvent),
    Inventory(InventoryEvent),
    Wallet(WalletEvent),
    Settings(SettingsEvent),
    Home(HomeEvent),
    Persistence(PersistenceEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::View(_) => Topic::View,
            Event::Shop(_) => Topic::Shop,
            Event::Mail(_) => Topic::Mail,
            Event::Character(_) => Topic::Character,
            Event::Inventory(_) => Topic::Inventory,
            Event::Wallet(_) => Topic::Wallet,
            Event::Settings(_) => Topic::Settings,
            Event::Home(_) => Topic::Home,
            Event::Persistence(_) => Topic::Persistence,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        $(
            impl From<$payload> for Event {
                fn from(event: $payload) -> Self {
                    Event::$variant(event)
                }
            }
        )*
    };
}

impl_from_payload!(
    View(ViewEvent),
    Shop(ShopEvent),
    Mail(MailEvent),
    Character(CharacterEvent),
    Inventory(InventoryEvent),
    Wallet(WalletEvent),
    Settings(SettingsEvent),
    Home(HomeEvent),
    Persistence(PersistenceEvent),
);

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    topic: Topic,
    id: u64,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    by_topic: HashMap<Topic, Vec<(u64, Handler)>>,
}

/// Topic-based event bus
///
/// Delivery is synchronous: `publish` returns after every handler subscribed
/// to the event's topic ran, in subscription order. The handler list is
/// snapshotted before delivery and no lock is held while handlers run, so a
/// handler may publish, subscribe or unsubscribe. Changes take effect from
/// the next publish.
///
/// Cloning is cheap and every clone shares subscribers and query providers.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Subscribers>>,
    queries: Arc<Queries>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to every event published on `topic`.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut subscribers = self.lock();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers
            .by_topic
            .entry(topic)
            .or_default()
            .push((id, Arc::new(handler)));
        Subscription { topic, id }
    }

    /// Returns false if the subscription was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.lock();
        let Some(handlers) = subscribers.by_topic.get_mut(&subscription.topic) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription.id);
        handlers.len() != before
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        let handlers: Vec<Handler> = self
            .lock()
            .by_topic
            .get(&topic)
            .map(|handlers| handlers.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::trace!(?topic, "No subscribers for event");
            return;
        }

        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.lock().by_topic.get(&topic).map_or(0, Vec::len)
    }

    /// Request/response channels with a single provider each.
    pub fn queries(&self) -> &Queries {
        &self.queries
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        // Handlers never run under this lock, so a poisoned guard still holds
        // a consistent subscriber list.
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self.lock();
        let total: usize = subscribers.by_topic.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("subscribers", &total)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::view::ScreenId;

    fn recorder(bus: &EventBus, topic: Topic) -> Arc<Mutex<Vec<Event>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(topic, move |event| sink.lock().unwrap().push(event.clone()));
        seen
    }

    #[test]
    fn delivers_only_to_matching_topic() {
        let bus = EventBus::new();
        let view = recorder(&bus, Topic::View);
        let wallet = recorder(&bus, Topic::Wallet);

        bus.publish(ViewEvent::ScreenShown(ScreenId::Home));

        assert_eq!(view.lock().unwrap().len(), 1);
        assert!(wallet.lock().unwrap().is_empty());
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = Arc::clone(&order);
            bus.subscribe(Topic::Home, move |_| order.lock().unwrap().push(n));
        }

        bus.publish(HomeEvent::WelcomeMessage("hi".into()));

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let sub = bus.subscribe(Topic::Settings, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(SettingsEvent::ResetFundsRequested);
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        bus.publish(SettingsEvent::ResetFundsRequested);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(Topic::Settings), 0);
    }

    #[test]
    fn publishing_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.publish(PersistenceEvent::Saved);
    }

    #[test]
    fn handler_subscribed_during_delivery_sees_next_publish_only() {
        let bus = EventBus::new();
        let late = Arc::new(AtomicUsize::new(0));

        let inner_bus = bus.clone();
        let inner_late = Arc::clone(&late);
        bus.subscribe(Topic::Wallet, move |_| {
            let late = Arc::clone(&inner_late);
            inner_bus.subscribe(Topic::Wallet, move |_| {
                late.fetch_add(1, Ordering::SeqCst);
            });
        });

        bus.publish(WalletEvent::FundsUpdated { gold: 1, gems: 1 });
        assert_eq!(late.load(Ordering::SeqCst), 0);

        bus.publish(WalletEvent::FundsUpdated { gold: 2, gems: 2 });
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handlers_may_publish_reentrantly() {
        let bus = EventBus::new();
        let home = recorder(&bus, Topic::Home);

        let inner = bus.clone();
        bus.subscribe(Topic::View, move |event| {
            if let Event::View(ViewEvent::ScreenShown(ScreenId::Home)) = event {
                inner.publish(HomeEvent::WelcomeMessage("Welcome!".into()));
            }
        });

        bus.publish(ViewEvent::ScreenShown(ScreenId::Home));

        assert_eq!(
            *home.lock().unwrap(),
            vec![Event::Home(HomeEvent::WelcomeMessage("Welcome!".into()))]
        );
    }

    #[test]
    fn clones_share_subscribers() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let seen = recorder(&bus, Topic::Persistence);

        clone.publish(PersistenceEvent::Saved);

        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
