//! Runtime of the game menu front end.
//!
//! This crate wires the pure rules of `menu-core` to a host UI: a
//! synchronous topic-based event bus, a view state machine, player-state
//! persistence, catalog oracles and cancellable UI sequences. Hosts build a
//! [`MenuRuntime`], publish request events on its [`EventBus`], and render
//! the result events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`events`] provides the bus, the event contract and query channels
//! - [`view`] tracks screen and overlay visibility
//! - [`services`] bind the economy, persistence and sequences to the bus
//! - [`oracle`] and [`repository`] provide data adapters
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod services;
pub mod view;

pub use config::{RuntimeConfig, SequenceConfig};
pub use error::{Result, RuntimeError};
pub use events::{
    Aspect, BusError, CharacterEvent, Event, EventBus, HomeEvent, InventoryEvent, MailEvent,
    PersistenceEvent, PurchaseFailure, Queries, QueryChannel, SettingsEvent, SettingsRequest,
    ShopEvent, Subscription, Topic, ViewEvent, WalletEvent,
};
pub use logging::init_tracing;
pub use oracle::OracleManager;
pub use repository::{FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository};
pub use runtime::{MenuRuntime, RuntimeBuilder};
pub use services::{
    GameDataService, PaymentOutcome, PaymentProcessor, PlaceholderPayments, SaveService,
    SequenceKind, SequenceRunner, SequenceToken, ViewService,
};
pub use view::{OverlayId, OverlayPolicy, ScreenId, ViewStateMachine};
