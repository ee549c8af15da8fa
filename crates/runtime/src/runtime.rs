//! High-level runtime orchestrator.
//!
//! The runtime owns the bus, the catalog oracles and every service, wires
//! their subscriptions, and exposes a builder-based API for hosts to start
//! and stop the menu.

use std::sync::Arc;

use menu_core::{ChatOracle, PlayerState};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, PersistenceEvent, Subscription};
use crate::oracle::OracleManager;
use crate::repository::{FileStateRepository, InMemoryStateRepo, StateRepository};
use crate::services::{
    GameDataService, PaymentProcessor, PlaceholderPayments, SaveService, SequenceRunner,
    ViewService,
};
use crate::view::{OverlayPolicy, ScreenId};

/// Main runtime of the game menu
///
/// Design: the runtime owns services and subscriptions; hosts talk to it
/// through [`EventBus`] requests and read results from events.
#[derive(Debug)]
pub struct MenuRuntime {
    config: RuntimeConfig,
    bus: EventBus,
    oracles: OracleManager,
    game_data: Arc<GameDataService>,
    view: Arc<ViewService>,
    save: SaveService,
    sequences: SequenceRunner,
    subscriptions: Vec<Subscription>,
    new_game: bool,
    started: bool,
}

impl MenuRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Attaches services, publishes the initial balances and shows Home.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(RuntimeError::AlreadyStarted);
        }

        self.subscriptions.extend(self.game_data.attach()?);
        self.subscriptions.extend(self.view.attach());
        self.subscriptions.extend(self.save.attach());
        self.subscriptions.extend(self.sequences.attach());
        self.started = true;

        self.bus.publish(PersistenceEvent::Loaded {
            new_game: self.new_game,
        });
        self.game_data.publish_balances();
        self.view.show_modal(ScreenId::Home);

        tracing::info!(new_game = self.new_game, "Menu runtime started");
        Ok(())
    }

    /// Stops sequences, saves, and releases every subscription.
    ///
    /// Subscriptions are released even when the save fails; the save error
    /// is returned afterwards.
    pub fn shutdown(mut self) -> Result<()> {
        self.sequences.shutdown();
        let saved = if self.started {
            self.save.save()
        } else {
            Ok(())
        };

        for subscription in self.subscriptions.drain(..) {
            self.bus.unsubscribe(subscription);
        }
        self.game_data.detach_queries();

        tracing::info!("Menu runtime stopped");
        saved
    }

    /// Shared bus. Hosts publish requests and subscribe to results here.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn publish(&self, event: impl Into<Event>) {
        self.bus.publish(event);
    }

    /// Read-only copy of the live player state.
    pub fn snapshot(&self) -> PlayerState {
        self.game_data.snapshot()
    }

    pub fn current_screen(&self) -> ScreenId {
        self.view.current()
    }

    pub fn view(&self) -> &ViewService {
        &self.view
    }

    pub fn sequences(&self) -> &SequenceRunner {
        &self.sequences
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// True when startup found no usable save and began a new game.
    pub fn is_new_game(&self) -> bool {
        self.new_game
    }
}

/// Builder for [`MenuRuntime`] with flexible configuration.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn StateRepository>>,
    payments: Option<Arc<dyn PaymentProcessor>>,
    bus: Option<EventBus>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Catalog oracles. Defaults to the built-in catalog.
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Save repository. Defaults to a file at the configured save path, or
    /// memory when `load_from_disk` is off.
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Payment processor for real-money listings.
    pub fn payments(mut self, payments: Arc<dyn PaymentProcessor>) -> Self {
        self.payments = Some(payments);
        self
    }

    /// Use an existing bus, e.g. one the host already subscribed to.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Loads the player state and assembles the services.
    pub fn build(self) -> Result<MenuRuntime> {
        let config = self.config;
        let bus = self.bus.unwrap_or_default();

        let oracles = match self.oracles {
            Some(oracles) => oracles,
            None => OracleManager::from_catalog_data(
                menu_content::builtin::catalog().map_err(RuntimeError::Content)?,
            ),
        };

        let repository: Arc<dyn StateRepository> = match self.repository {
            Some(repository) => repository,
            None if config.load_from_disk => Arc::new(FileStateRepository::new(&config.save_path)),
            None => Arc::new(InMemoryStateRepo::new()),
        };
        let payments: Arc<dyn PaymentProcessor> = match self.payments {
            Some(payments) => payments,
            None => Arc::new(PlaceholderPayments),
        };

        let save = SaveService::new(repository, bus.clone());
        let (state, new_game) = save.load_or_new(&oracles.as_catalog(), &config.game);

        let game_data = Arc::new(GameDataService::new(
            state,
            oracles.clone(),
            config.game.clone(),
            payments,
            bus.clone(),
        ));
        let view = Arc::new(ViewService::new(
            OverlayPolicy {
                full_screen: config.full_screen_overlays,
            },
            bus.clone(),
        ));
        let sequences = SequenceRunner::new(
            config.sequences.clone(),
            bus.clone(),
            oracles.chat().chat_lines(),
        );

        Ok(MenuRuntime {
            config,
            bus,
            oracles,
            game_data,
            view,
            save,
            sequences,
            subscriptions: Vec::new(),
            new_game,
            started: false,
        })
    }
}
