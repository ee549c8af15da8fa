//! Repository contract for saving and loading the player state.

use menu_core::PlayerState;

use super::Result;

/// Persistence of the single player-state document.
pub trait StateRepository: Send + Sync {
    /// Replace the stored document with `state`.
    fn save(&self, state: &PlayerState) -> Result<()>;

    /// `Ok(None)` when nothing was saved yet. Unreadable documents are
    /// reported as [`super::RepositoryError::CorruptedData`].
    fn load(&self) -> Result<Option<PlayerState>>;

    fn exists(&self) -> bool;

    fn delete(&self) -> Result<()>;
}
