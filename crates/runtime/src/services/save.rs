//! Loads the player state on startup and saves it on demand.

use std::sync::Arc;

use menu_core::{Catalog, GameConfig, PlayerState};

use crate::error::Result;
use crate::events::{Event, EventBus, PersistenceEvent, SettingsEvent, Subscription, Topic};
use crate::repository::StateRepository;

/// Persistence front end over a [`StateRepository`].
///
/// Saves read the live state through the player-state query channel, so the
/// service never holds the aggregate itself.
#[derive(Clone)]
pub struct SaveService {
    repository: Arc<dyn StateRepository>,
    bus: EventBus,
}

impl SaveService {
    pub fn new(repository: Arc<dyn StateRepository>, bus: EventBus) -> Self {
        Self { repository, bus }
    }

    /// Loads the saved state, falling back to a new game.
    ///
    /// A missing, unreadable or inconsistent document is not fatal: it is
    /// logged and a fresh state is built from the catalog. The flag is true
    /// when a new game was started.
    pub fn load_or_new(&self, catalog: &Catalog<'_>, config: &GameConfig) -> (PlayerState, bool) {
        match self.repository.load() {
            Ok(Some(state)) => match state.check_invariants() {
                Ok(()) => {
                    tracing::info!("Loaded saved player state");
                    return (state, false);
                }
                Err(violation) => {
                    tracing::warn!(%violation, "Saved state is inconsistent, starting a new game");
                }
            },
            Ok(None) => tracing::info!("No saved state, starting a new game"),
            Err(error) => {
                tracing::warn!(%error, "Failed to load saved state, starting a new game");
            }
        }
        (PlayerState::new_game(catalog, config), true)
    }

    /// Saves the current state.
    ///
    /// On failure the in-memory state is kept, `SaveFailed` is published and
    /// the error is returned for callers that want it.
    pub fn save(&self) -> Result<()> {
        let outcome: Result<()> = self
            .bus
            .queries()
            .player_state
            .query()
            .map_err(Into::into)
            .and_then(|state| self.repository.save(&state).map_err(Into::into));

        match &outcome {
            Ok(()) => {
                tracing::debug!("Player state saved");
                self.bus.publish(PersistenceEvent::Saved);
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to save player state");
                self.bus.publish(PersistenceEvent::SaveFailed {
                    reason: error.to_string(),
                });
            }
        }
        outcome
    }

    /// Saves whenever new settings are applied.
    pub fn attach(&self) -> Vec<Subscription> {
        let service = self.clone();
        let subscription = self.bus.subscribe(Topic::Settings, move |event| {
            if let Event::Settings(SettingsEvent::SettingsApplied(_)) = event {
                // Failures are reported through `SaveFailed`.
                let _ = service.save();
            }
        });
        vec![subscription]
    }
}

impl std::fmt::Debug for SaveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveService").finish_non_exhaustive()
    }
}
