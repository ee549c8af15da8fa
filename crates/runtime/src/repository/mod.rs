//! Repository layer for the persisted player state.
//!
//! Catalog content is served by oracles; repositories hold only the data
//! that changes during play.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
