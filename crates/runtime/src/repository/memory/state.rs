//! In-memory StateRepository implementation for tests and local runs.

use std::sync::RwLock;

use menu_core::PlayerState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// Keeps the saved document in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStateRepo {
    state: RwLock<Option<PlayerState>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PlayerState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, state: &PlayerState) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PlayerState>> {
        let slot = self
            .state
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.state.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let repo = InMemoryStateRepo::new();
        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn save_replaces_document() {
        let repo = InMemoryStateRepo::with_state(PlayerState::default());
        let mut next = PlayerState::default();
        next.currencies.gold = 9;

        repo.save(&next).unwrap();
        assert_eq!(repo.load().unwrap(), Some(next));

        repo.delete().unwrap();
        assert!(!repo.exists());
    }
}
