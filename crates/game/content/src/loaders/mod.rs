//! Content loaders for reading catalog data from files.
//!
//! Each loader reads one RON (or TOML) document and returns core catalog
//! definitions. [`ContentFactory`] loads a whole data directory at once.

pub mod catalog;
pub mod characters;
pub mod config;
pub mod equipment;
pub mod factory;
pub mod levels;
pub mod mail;
pub mod shop;

pub use catalog::CatalogData;
pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use equipment::EquipmentLoader;
pub use factory::ContentFactory;
pub use levels::{ChatLoader, LevelLoader};
pub use mail::MailLoader;
pub use shop::ShopLoader;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}

/// Rejects catalogs that define the same id twice.
pub(crate) fn ensure_unique_ids<T, K>(
    entries: &[T],
    id: impl Fn(&T) -> K,
    what: &str,
) -> LoadResult<()>
where
    K: Ord + Display,
{
    let mut seen = BTreeSet::new();
    for entry in entries {
        let key = id(entry);
        if seen.contains(&key) {
            anyhow::bail!("Duplicate {} id {}", what, key);
        }
        seen.insert(key);
    }
    Ok(())
}
