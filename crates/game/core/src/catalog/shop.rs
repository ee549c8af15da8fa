use crate::catalog::Reward;
use crate::state::types::{CurrencyKind, ShopItemId};

pub trait ShopOracle: Send + Sync {
    fn shop_item(&self, id: ShopItemId) -> Option<ShopItemDefinition>;

    /// Every listing, ordered by id.
    fn all_shop_items(&self) -> Vec<ShopItemDefinition>;
}

/// A shop listing.
///
/// `cost` is expressed in the unit of `currency`: whole coins for gold and
/// gems, cents for the real-money placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItemDefinition {
    pub id: ShopItemId,
    pub name: String,
    pub cost: u32,
    /// Percent off, 0..=100. Larger values are treated as 100.
    #[cfg_attr(feature = "serde", serde(default))]
    pub discount: u32,
    pub currency: CurrencyKind,
    pub content: Reward,
    #[cfg_attr(feature = "serde", serde(default))]
    pub promo_label: Option<String>,
}

impl ShopItemDefinition {
    pub fn new(
        id: ShopItemId,
        name: impl Into<String>,
        cost: u32,
        discount: u32,
        currency: CurrencyKind,
        content: Reward,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            discount,
            currency,
            content,
            promo_label: None,
        }
    }

    pub fn tab(&self) -> ShopTab {
        ShopTab::for_reward(&self.content)
    }
}

/// Shop screen tabs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ShopTab {
    Gold,
    Gems,
    /// Health and level-up potions.
    Potions,
    /// Equipment bundles.
    Gear,
}

impl ShopTab {
    pub const fn for_reward(reward: &Reward) -> Self {
        match reward {
            Reward::Gold(_) => Self::Gold,
            Reward::Gems(_) => Self::Gems,
            Reward::HealthPotions(_) | Reward::LevelUpPotions(_) => Self::Potions,
            Reward::Equipment(_) => Self::Gear,
        }
    }
}

/// Listings shown under `tab`, cheapest first.
pub fn shop_listing(oracle: &dyn ShopOracle, tab: ShopTab) -> Vec<ShopItemDefinition> {
    let mut items: Vec<_> = oracle
        .all_shop_items()
        .into_iter()
        .filter(|item| item.tab() == tab)
        .collect();
    items.sort_by_key(|item| item.cost);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listings(Vec<ShopItemDefinition>);

    impl ShopOracle for Listings {
        fn shop_item(&self, id: ShopItemId) -> Option<ShopItemDefinition> {
            self.0.iter().find(|item| item.id == id).cloned()
        }

        fn all_shop_items(&self) -> Vec<ShopItemDefinition> {
            self.0.clone()
        }
    }

    fn listings() -> Listings {
        Listings(vec![
            ShopItemDefinition::new(ShopItemId(1), "Sack", 300, 0, CurrencyKind::Gems, Reward::Gold(1000)),
            ShopItemDefinition::new(ShopItemId(2), "Pouch", 50, 0, CurrencyKind::Gems, Reward::Gold(100)),
            ShopItemDefinition::new(ShopItemId(3), "Tonic", 20, 0, CurrencyKind::Gold, Reward::HealthPotions(1)),
            ShopItemDefinition::new(ShopItemId(4), "Elixir", 10, 0, CurrencyKind::Gold, Reward::LevelUpPotions(5)),
            ShopItemDefinition::new(ShopItemId(5), "Chest", 499, 0, CurrencyKind::Usd, Reward::Gems(100)),
        ])
    }

    #[test]
    fn listing_filters_by_tab_cheapest_first() {
        let ids: Vec<_> = shop_listing(&listings(), ShopTab::Gold)
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec![ShopItemId(2), ShopItemId(1)]);
    }

    #[test]
    fn potions_tab_holds_both_potion_kinds() {
        let listing = shop_listing(&listings(), ShopTab::Potions);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "Elixir");
        assert!(shop_listing(&listings(), ShopTab::Gear).is_empty());
    }
}
