//! Event bus, topics and query channels.
//!
//! Screens and services never hold references to each other: they publish
//! request events, subscribe to result events, and read shared views through
//! [`Queries`].

mod bus;
mod query;
mod types;

pub use bus::{Event, EventBus, Subscription, Topic};
pub use query::{BusError, Queries, QueryChannel};
pub use types::{
    Aspect, CharacterEvent, HomeEvent, InventoryEvent, MailEvent, PersistenceEvent,
    PurchaseFailure, SettingsEvent, SettingsRequest, ShopEvent, ViewEvent, WalletEvent,
};
