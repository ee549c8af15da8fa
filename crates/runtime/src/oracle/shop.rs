//! [`menu_core::ShopOracle`] backed by an ordered map.
use std::collections::BTreeMap;

use menu_core::{ShopItemDefinition, ShopItemId, ShopOracle};

/// ShopOracle implementation with static listings
#[derive(Debug, Default)]
pub struct ShopOracleImpl {
    items: BTreeMap<ShopItemId, ShopItemDefinition>,
}

impl ShopOracleImpl {
    pub fn new(items: impl IntoIterator<Item = ShopItemDefinition>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn add_item(&mut self, item: ShopItemDefinition) {
        self.items.insert(item.id, item);
    }
}

impl ShopOracle for ShopOracleImpl {
    fn shop_item(&self, id: ShopItemId) -> Option<ShopItemDefinition> {
        self.items.get(&id).cloned()
    }

    fn all_shop_items(&self) -> Vec<ShopItemDefinition> {
        self.items.values().cloned().collect()
    }
}
