//! Unified error type surfaced by the runtime API.
//!
//! Wraps repository, bus and content-loading failures so hosts can bubble
//! them up with consistent context. Rejected transactions are not errors at
//! this level: they reach screens as `*Failed` events.
use thiserror::Error;

pub use crate::events::BusError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error("failed to load catalog content")]
    Content(#[source] anyhow::Error),

    #[error("player state lock was poisoned")]
    StatePoisoned,

    #[error("runtime has already been started")]
    AlreadyStarted,

    #[error("sequence task join failed")]
    SequenceJoin(#[source] tokio::task::JoinError),
}
