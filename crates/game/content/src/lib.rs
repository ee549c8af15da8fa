//! Data-driven catalog content and loaders.
//!
//! This crate houses the static menu content and loads it from RON/TOML:
//! - Shop listings, equipment, characters (RON)
//! - Mail templates, levels, home chat script (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed by runtime oracles and never appears in player state.
//! A default catalog is compiled in (see [`builtin`]) so a host can run
//! without a data directory.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogData, CharacterLoader, ChatLoader, ConfigLoader, ContentFactory, EquipmentLoader,
    LevelLoader, LoadResult, MailLoader, ShopLoader,
};
