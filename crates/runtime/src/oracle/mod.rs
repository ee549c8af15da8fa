//! Runtime wrappers around static catalog oracles.
//!
//! These implementations expose `menu-core` oracle traits and bundle them
//! into an [`OracleManager`] so services can build [`Catalog`] views on
//! demand. Catalog data is immutable at runtime; player state lives in the
//! game-data service.
mod characters;
mod equipment;
mod levels;
mod mail;
mod shop;

use std::sync::Arc;

use menu_content::CatalogData;
use menu_core::Catalog;

pub use characters::CharacterOracleImpl;
pub use equipment::EquipmentOracleImpl;
pub use levels::{ChatOracleImpl, LevelOracleImpl};
pub use mail::MailOracleImpl;
pub use shop::ShopOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone, Debug)]
pub struct OracleManager {
    pub(crate) shop: Arc<ShopOracleImpl>,
    pub(crate) equipment: Arc<EquipmentOracleImpl>,
    pub(crate) characters: Arc<CharacterOracleImpl>,
    pub(crate) mail: Arc<MailOracleImpl>,
    pub(crate) levels: Arc<LevelOracleImpl>,
    pub(crate) chat: Arc<ChatOracleImpl>,
}

impl OracleManager {
    pub fn new(
        shop: Arc<ShopOracleImpl>,
        equipment: Arc<EquipmentOracleImpl>,
        characters: Arc<CharacterOracleImpl>,
        mail: Arc<MailOracleImpl>,
        levels: Arc<LevelOracleImpl>,
        chat: Arc<ChatOracleImpl>,
    ) -> Self {
        Self {
            shop,
            equipment,
            characters,
            mail,
            levels,
            chat,
        }
    }

    /// Builds every oracle from loaded catalog tables.
    ///
    /// Dangling equipment references are logged and left in place; the
    /// affected rewards and default gear are skipped at use.
    pub fn from_catalog_data(data: CatalogData) -> Self {
        let dangling = data.dangling_equipment();
        if !dangling.is_empty() {
            tracing::warn!(count = dangling.len(), "catalog has dangling equipment references");
        }

        Self::new(
            Arc::new(ShopOracleImpl::new(data.shop_items)),
            Arc::new(EquipmentOracleImpl::new(data.equipment)),
            Arc::new(CharacterOracleImpl::new(data.characters)),
            Arc::new(MailOracleImpl::new(data.mail)),
            Arc::new(LevelOracleImpl::new(data.levels)),
            Arc::new(ChatOracleImpl::new(data.chat)),
        )
    }

    /// Borrowed catalog view handed to the economy engine.
    pub fn as_catalog(&self) -> Catalog<'_> {
        Catalog::with_all(
            self.shop.as_ref(),
            self.equipment.as_ref(),
            self.characters.as_ref(),
            self.mail.as_ref(),
            self.levels.as_ref(),
            self.chat.as_ref(),
        )
    }

    pub fn chat(&self) -> &ChatOracleImpl {
        &self.chat
    }
}

#[cfg(test)]
mod tests {
    use menu_core::{ChatOracle, ShopItemId, ShopOracle};

    use super::*;

    #[test]
    fn builtin_catalog_is_reachable() {
        let data = menu_content::builtin::catalog().unwrap();
        let expected_items = data.shop_items.len();
        let oracles = OracleManager::from_catalog_data(data);
        let catalog = oracles.as_catalog();

        let shop = catalog.shop().unwrap();
        assert_eq!(shop.all_shop_items().len(), expected_items);
        assert!(shop.shop_item(ShopItemId(1)).is_some());
        assert!(!oracles.chat().chat_lines().is_empty());
    }

    #[test]
    fn listings_are_ordered_by_id() {
        let data = menu_content::builtin::catalog().unwrap();
        let oracles = OracleManager::from_catalog_data(data);
        let ids: Vec<_> = oracles.shop.all_shop_items().iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
