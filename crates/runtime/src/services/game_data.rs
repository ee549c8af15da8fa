//! Binds the economy and progression rules to the event bus.
//!
//! [`GameDataService`] is the single owner of the live [`PlayerState`].
//! Every request runs as one transaction under the state lock: the engine
//! works on a copy, the copy is committed, the lock is released, and only
//! then are result events published. Handlers reached by those events may
//! issue further requests without deadlocking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use menu_core::{
    AutoEquip, CharacterId, CharacterOracle, ClaimReward, Committed, DeleteMessage, EconomyEngine,
    EquipGear, GameConfig, GameError, InvariantViolation, LevelMeter, LevelUp, MarkRead,
    MessageId, PlayerState, Purchase, PurchaseError, PurchaseReceipt, ResetFunds, ResetLevels,
    Settings, ShopItemId, ShopOracle, Transaction, TransactionPhase, TransactionPhaseError,
    TransactionResult, UndeleteMessage, UnequipAll, UnequipSlot, UpdateSettings, can_level_up,
    power_score,
};

use crate::error::Result;
use crate::events::{
    Aspect, CharacterEvent, Event, EventBus, HomeEvent, InventoryEvent, MailEvent,
    PurchaseFailure, SettingsEvent, SettingsRequest, ShopEvent, Subscription, Topic, ViewEvent,
    WalletEvent,
};
use crate::oracle::OracleManager;
use crate::view::ScreenId;

use super::payment::{PaymentOutcome, PaymentProcessor};

pub struct GameDataService {
    state: Mutex<PlayerState>,
    aspect: Mutex<Aspect>,
    oracles: OracleManager,
    config: GameConfig,
    payments: Arc<dyn PaymentProcessor>,
    bus: EventBus,
}

impl GameDataService {
    pub fn new(
        state: PlayerState,
        oracles: OracleManager,
        config: GameConfig,
        payments: Arc<dyn PaymentProcessor>,
        bus: EventBus,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            aspect: Mutex::new(Aspect::default()),
            oracles,
            config,
            payments,
            bus,
        }
    }

    /// Read-only copy of the live state.
    pub fn snapshot(&self) -> PlayerState {
        self.lock_state().clone()
    }

    pub fn level_meter(&self) -> LevelMeter {
        LevelMeter::from_characters(&self.lock_state().characters)
    }

    /// Subscribes the request handlers and registers the query providers.
    pub fn attach(self: &Arc<Self>) -> Result<Vec<Subscription>> {
        let queries = self.bus.queries();
        let weak = Arc::downgrade(self);
        queries.level_meter.register(move || {
            weak.upgrade()
                .map(|service| service.level_meter())
                .unwrap_or_else(|| LevelMeter::new(0))
        })?;
        let weak = Arc::downgrade(self);
        if let Err(err) = queries.player_state.register(move || {
            weak.upgrade()
                .map(|service| service.snapshot())
                .unwrap_or_default()
        }) {
            queries.level_meter.unregister();
            return Err(err.into());
        }

        Ok([
            Topic::View,
            Topic::Shop,
            Topic::Mail,
            Topic::Character,
            Topic::Inventory,
            Topic::Settings,
        ]
        .into_iter()
        .map(|topic| subscribe_weak(&self.bus, topic, Arc::downgrade(self)))
        .collect())
    }

    /// Removes the query providers installed by [`Self::attach`].
    pub fn detach_queries(&self) {
        let queries = self.bus.queries();
        queries.level_meter.unregister();
        queries.player_state.unregister();
    }

    /// Publishes current balances, e.g. on startup.
    pub fn publish_balances(&self) {
        let state = self.snapshot();
        self.announce_balances(&state);
    }

    fn handle(&self, event: &Event) {
        match event {
            Event::View(ViewEvent::ScreenShown(ScreenId::Home)) => self.home_shown(),
            Event::Shop(ShopEvent::PurchaseRequested { item }) => self.purchase(*item),
            Event::Mail(request) => self.mail_request(request),
            Event::Character(CharacterEvent::CharacterSelected { character }) => {
                self.announce_character(*character)
            }
            Event::Character(CharacterEvent::LevelUpRequested { character }) => {
                self.level_up(*character)
            }
            Event::Inventory(request) => self.gear_request(request),
            Event::Settings(request) => self.settings_request(request),
            _ => {}
        }
    }

    fn home_shown(&self) {
        let (username, meter) = {
            let state = self.lock_state();
            (
                state.settings.username.clone(),
                LevelMeter::from_characters(&state.characters),
            )
        };
        self.bus
            .publish(HomeEvent::WelcomeMessage(format!("Welcome {username}!")));
        self.bus.publish(HomeEvent::LevelMeterUpdated(meter));
    }

    fn purchase(&self, item: ShopItemId) {
        match self.settle_purchase(item) {
            Ok(Committed { state, outcome }) => {
                self.bus.publish(ShopEvent::PurchaseSucceeded(outcome));
                self.announce_balances(&state);
            }
            Err(reason) => self.bus.publish(ShopEvent::PurchaseFailed { item, reason }),
        }
    }

    /// Validates the purchase, settles real-money listings with the payment
    /// processor, then commits.
    ///
    /// The processor is only asked once the transaction has passed every
    /// phase, and the state lock is held until commit so the validated state
    /// is the one that gets committed.
    fn settle_purchase(
        &self,
        item: ShopItemId,
    ) -> std::result::Result<Committed<PurchaseReceipt>, PurchaseFailure> {
        let transaction = Purchase::new(item);
        let engine = EconomyEngine::new(self.oracles.as_catalog(), &self.config);
        let mut state = self.lock_state();

        let committed = engine.execute(&transaction, &state).map_err(|err| {
            log_rejection(&transaction, &err);
            PurchaseFailure::Rejected {
                phase: err.phase,
                error: err.error,
            }
        })?;

        if committed.outcome.external_payment {
            let listing = self
                .oracles
                .shop
                .shop_item(item)
                .ok_or(PurchaseFailure::Rejected {
                    phase: TransactionPhase::PreValidate,
                    error: PurchaseError::ItemNotFound(item),
                })?;
            if let PaymentOutcome::Declined { reason } =
                self.payments.authorize(&listing, committed.outcome.price)
            {
                tracing::info!(%item, %reason, "payment declined");
                return Err(PurchaseFailure::PaymentDeclined { reason });
            }
        }

        *state = committed.state.clone();
        tracing::debug!(?transaction, "transaction committed");
        Ok(committed)
    }

    fn mail_request(&self, request: &MailEvent) {
        let (message, result) = match *request {
            MailEvent::ClaimRequested { message } => {
                self.claim(message);
                return;
            }
            MailEvent::MarkReadRequested { message } => {
                (message, self.transact(&MarkRead::new(message)).map(|c| c.state))
            }
            MailEvent::DeleteRequested { message } => (
                message,
                self.transact(&DeleteMessage::new(message)).map(|c| c.state),
            ),
            MailEvent::UndeleteRequested { message } => (
                message,
                self.transact(&UndeleteMessage::new(message))
                    .map(|c| c.state),
            ),
            _ => return,
        };

        match result {
            Ok(state) => self.announce_mailbox(&state),
            Err(TransactionPhaseError { error, .. }) => {
                self.bus.publish(MailEvent::ActionFailed { message, error });
            }
        }
    }

    fn claim(&self, message: MessageId) {
        match self.transact(&ClaimReward::new(message)) {
            Ok(Committed { state, outcome }) => {
                self.bus.publish(MailEvent::RewardClaimed(outcome));
                self.announce_balances(&state);
                self.announce_mailbox(&state);
            }
            Err(TransactionPhaseError { phase, error }) => {
                self.bus.publish(MailEvent::ClaimFailed {
                    message,
                    phase,
                    error,
                });
            }
        }
    }

    fn level_up(&self, character: CharacterId) {
        match self.transact(&LevelUp::new(character)) {
            Ok(Committed { state, outcome }) => {
                self.bus.publish(CharacterEvent::LevelUpSucceeded(outcome));
                self.announce_balances(&state);
                self.announce_character_in(&state, character);
                self.bus.publish(HomeEvent::LevelMeterUpdated(
                    LevelMeter::from_characters(&state.characters),
                ));
            }
            Err(TransactionPhaseError { phase, error }) => {
                self.bus.publish(CharacterEvent::LevelUpFailed {
                    character,
                    phase,
                    error,
                });
            }
        }
    }

    fn gear_request(&self, request: &InventoryEvent) {
        let (character, result) = match *request {
            InventoryEvent::EquipRequested {
                character,
                slot,
                equipment,
            } => (
                character,
                self.transact(&EquipGear::new(character, slot, equipment)),
            ),
            InventoryEvent::UnequipRequested { character, slot } => {
                (character, self.transact(&UnequipSlot::new(character, slot)))
            }
            InventoryEvent::UnequipAllRequested { character } => {
                (character, self.transact(&UnequipAll::new(character)))
            }
            InventoryEvent::AutoEquipRequested { character } => {
                (character, self.transact(&AutoEquip::new(character)))
            }
            _ => return,
        };

        match result {
            Ok(committed) => self.bus.publish(InventoryEvent::GearChanged(committed.outcome)),
            Err(TransactionPhaseError { error, .. }) => {
                self.bus
                    .publish(InventoryEvent::GearFailed { character, error });
            }
        }
    }

    fn settings_request(&self, request: &SettingsEvent) {
        match request {
            SettingsEvent::SettingsUpdated(settings) => self.update_settings(settings.clone()),
            SettingsEvent::ResetFundsRequested => match self.transact(&ResetFunds) {
                Ok(committed) => self.announce_balances(&committed.state),
                Err(err) => self.settings_failed(SettingsRequest::ResetFunds, err),
            },
            SettingsEvent::ResetLevelsRequested => match self.transact(&ResetLevels) {
                Ok(committed) => self.bus.publish(HomeEvent::LevelMeterUpdated(
                    LevelMeter::from_characters(&committed.state.characters),
                )),
                Err(err) => self.settings_failed(SettingsRequest::ResetLevels, err),
            },
            SettingsEvent::AspectChanged(aspect) => {
                *self.aspect.lock().unwrap_or_else(PoisonError::into_inner) = *aspect;
                let theme = self.lock_state().settings.theme.clone();
                self.announce_theme(&theme);
            }
            _ => {}
        }
    }

    fn update_settings(&self, settings: Settings) {
        let outcome = match self.transact(&UpdateSettings::new(settings)) {
            Ok(committed) => committed.outcome,
            Err(err) => {
                self.settings_failed(SettingsRequest::UpdateSettings, err);
                return;
            }
        };
        self.bus
            .publish(SettingsEvent::FpsCounterToggled(outcome.fps_counter_enabled));
        self.bus
            .publish(SettingsEvent::TargetFrameRateSet(outcome.target_frame_rate()));
        self.announce_theme(&outcome.theme);
        self.bus.publish(SettingsEvent::SettingsApplied(outcome));
    }

    fn settings_failed(
        &self,
        request: SettingsRequest,
        TransactionPhaseError { phase, error }: TransactionPhaseError<InvariantViolation>,
    ) {
        tracing::warn!(%request, phase = phase.as_str(), %error, "settings request failed");
        self.bus.publish(SettingsEvent::RequestFailed {
            request,
            phase,
            error,
        });
    }

    fn announce_character(&self, character: CharacterId) {
        let state = self.snapshot();
        self.announce_character_in(&state, character);
    }

    fn announce_character_in(&self, state: &PlayerState, character: CharacterId) {
        let Some(owned) = state.character(character) else {
            tracing::debug!(%character, "selected character is not owned");
            return;
        };
        let level = owned.level();

        match self.oracles.characters.character(character) {
            Some(definition) => self.bus.publish(CharacterEvent::StatsUpdated {
                character,
                level,
                power: power_score(level, &definition.base_stats),
            }),
            None => tracing::warn!(%character, "character has no catalog definition"),
        }

        self.bus.publish(CharacterEvent::LevelUpAvailability {
            character,
            enabled: can_level_up(state, character, &self.config),
        });
    }

    fn announce_balances(&self, state: &PlayerState) {
        self.bus.publish(WalletEvent::FundsUpdated {
            gold: state.currencies.gold,
            gems: state.currencies.gems,
        });
        self.bus.publish(WalletEvent::PotionsUpdated {
            health_potions: state.consumables.health_potions,
            level_up_potions: state.consumables.level_up_potions,
        });
    }

    fn announce_mailbox(&self, state: &PlayerState) {
        let inbox = state.mailbox.iter().filter(|m| !m.is_deleted());
        let unread = inbox.clone().filter(|m| !m.is_read()).count();
        let inbox = inbox.count();
        self.bus.publish(MailEvent::MailboxChanged {
            unread,
            inbox,
            deleted: state.mailbox.len() - inbox,
        });
    }

    fn announce_theme(&self, theme: &str) {
        let aspect = *self.aspect.lock().unwrap_or_else(PoisonError::into_inner);
        self.bus
            .publish(SettingsEvent::ThemeChanged(format!("{aspect}--{theme}")));
    }

    /// Runs `transaction` against the live state and commits on success.
    fn transact<T>(&self, transaction: &T) -> TransactionResult<T>
    where
        T: Transaction + std::fmt::Debug,
        T::Error: GameError,
    {
        let engine = EconomyEngine::new(self.oracles.as_catalog(), &self.config);
        let mut state = self.lock_state();
        match engine.execute(transaction, &state) {
            Ok(committed) => {
                *state = committed.state.clone();
                tracing::debug!(?transaction, "transaction committed");
                Ok(committed)
            }
            Err(err) => {
                log_rejection(transaction, &err);
                Err(err)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PlayerState> {
        // Commits are a single assignment, so a poisoned lock never exposes
        // a half-applied transaction.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for GameDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameDataService")
            .field("config", &self.config)
            .field("payments", &self.payments)
            .finish_non_exhaustive()
    }
}

fn log_rejection<T>(transaction: &T, err: &TransactionPhaseError<T::Error>)
where
    T: Transaction + std::fmt::Debug,
    T::Error: GameError,
{
    if err.error.severity().is_internal() {
        tracing::error!(
            ?transaction,
            phase = err.phase.as_str(),
            error = %err.error,
            "transaction broke an invariant"
        );
    } else {
        tracing::debug!(
            ?transaction,
            phase = err.phase.as_str(),
            error = %err.error,
            "transaction rejected"
        );
    }
}

fn subscribe_weak(bus: &EventBus, topic: Topic, service: Weak<GameDataService>) -> Subscription {
    bus.subscribe(topic, move |event| {
        if let Some(service) = service.upgrade() {
            service.handle(event);
        }
    })
}
