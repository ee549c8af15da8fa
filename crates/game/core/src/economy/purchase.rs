use crate::catalog::{OracleError, Reward, ShopItemDefinition};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CurrencyKind, EquipmentId, InvariantViolation, PlayerState, ShopItemId};

use super::pricing::{Price, discounted_price};
use super::transaction::{EconomyEnv, Transaction};

/// Buys one shop listing.
///
/// In-game currencies are debited here. Real-money listings pass validation
/// unconditionally: the payment itself is settled by an external processor
/// before the transaction runs, and the receipt flags it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Purchase {
    pub item: ShopItemId,
}

impl Purchase {
    pub fn new(item: ShopItemId) -> Self {
        Self { item }
    }

    fn listing(&self, env: &EconomyEnv<'_>) -> Result<ShopItemDefinition, PurchaseError> {
        env.catalog
            .shop()?
            .shop_item(self.item)
            .ok_or(PurchaseError::ItemNotFound(self.item))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseReceipt {
    pub item: ShopItemId,
    pub price: Price,
    pub content: Reward,
    /// True when the price was settled outside the in-game balances.
    pub external_payment: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PurchaseError {
    #[error("shop item {0} not found")]
    ItemNotFound(ShopItemId),

    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: Price, available: u32 },

    #[error("equipment {0} is already owned")]
    AlreadyOwned(EquipmentId),

    #[error("equipment {0} has no catalog definition")]
    UnknownEquipment(EquipmentId),

    #[error(transparent)]
    Catalog(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotFound(_) | Self::InsufficientFunds { .. } | Self::AlreadyOwned(_) => {
                ErrorSeverity::Validation
            }
            Self::UnknownEquipment(_) => ErrorSeverity::DataIntegrity,
            Self::Catalog(error) => error.severity(),
            Self::Invariant(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "PURCHASE_ITEM_NOT_FOUND",
            Self::InsufficientFunds { .. } => "PURCHASE_INSUFFICIENT_FUNDS",
            Self::AlreadyOwned(_) => "PURCHASE_ALREADY_OWNED",
            Self::UnknownEquipment(_) => "PURCHASE_UNKNOWN_EQUIPMENT",
            Self::Catalog(error) => error.error_code(),
            Self::Invariant(error) => error.error_code(),
        }
    }
}

impl Transaction for Purchase {
    type Output = PurchaseReceipt;
    type Error = PurchaseError;

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        let listing = self.listing(env)?;
        let price = discounted_price(listing.cost, listing.discount, listing.currency);

        if let Some(available) = state.currencies.balance(price.currency)
            && available < price.amount
        {
            return Err(PurchaseError::InsufficientFunds {
                required: price,
                available,
            });
        }

        if let Reward::Equipment(equipment) = listing.content {
            if env.catalog.equipment()?.equipment(equipment).is_none() {
                return Err(PurchaseError::UnknownEquipment(equipment));
            }
            if state.inventory.owns(equipment) {
                return Err(PurchaseError::AlreadyOwned(equipment));
            }
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let listing = self.listing(env)?;
        let price = discounted_price(listing.cost, listing.discount, listing.currency);

        state
            .currencies
            .debit(price.currency, price.amount)
            .map_err(|available| PurchaseError::InsufficientFunds {
                required: price,
                available,
            })?;

        if !super::credit(state, listing.content)
            && let Reward::Equipment(equipment) = listing.content
        {
            return Err(PurchaseError::AlreadyOwned(equipment));
        }

        Ok(PurchaseReceipt {
            item: self.item,
            price,
            content: listing.content,
            external_payment: price.currency == CurrencyKind::Usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::economy::test_support::Fixture;
    use crate::economy::{EconomyEngine, TransactionPhase};
    use crate::state::Currencies;

    fn player_with_gold(gold: u32) -> PlayerState {
        PlayerState {
            currencies: Currencies::new(gold, 0),
            ..PlayerState::default()
        }
    }

    #[test]
    fn half_price_purchase_debits_discounted_amount() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let committed = engine
            .purchase(ShopItemId(1), &player_with_gold(500))
            .expect("purchase succeeds");

        assert_eq!(committed.state.currencies.gold, 450);
        assert_eq!(committed.state.currencies.gems, 10);
        assert_eq!(committed.outcome.price, Price::new(CurrencyKind::Gold, 50));
        assert!(!committed.outcome.external_payment);
    }

    #[test]
    fn insufficient_funds_leaves_balance_untouched() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);
        let before = player_with_gold(10);

        let error = engine
            .purchase(ShopItemId(2), &before)
            .expect_err("purchase fails");

        assert_eq!(error.phase, TransactionPhase::PreValidate);
        assert_eq!(
            error.error,
            PurchaseError::InsufficientFunds {
                required: Price::new(CurrencyKind::Gold, 100),
                available: 10,
            }
        );
        assert_eq!(before.currencies.gold, 10);
        assert_eq!(error.error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn exact_balance_is_enough() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let committed = engine
            .purchase(ShopItemId(2), &player_with_gold(100))
            .expect("purchase succeeds");

        assert_eq!(committed.state.currencies.gold, 0);
        assert_eq!(committed.state.consumables.health_potions, 3);
    }

    #[test]
    fn real_money_listing_skips_balance_check() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let committed = engine
            .purchase(ShopItemId(3), &player_with_gold(0))
            .expect("purchase succeeds");

        assert!(committed.outcome.external_payment);
        assert_eq!(committed.state.currencies.gold, 1000);
    }

    #[test]
    fn equipment_cannot_be_bought_twice() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);
        let mut state = PlayerState::default();
        state.currencies.gems = 100;

        let first = engine.purchase(ShopItemId(4), &state).expect("first buy");
        assert!(first.state.inventory.owns(EquipmentId(5)));

        let second = engine
            .purchase(ShopItemId(4), &first.state)
            .expect_err("second buy");
        assert_eq!(second.error, PurchaseError::AlreadyOwned(EquipmentId(5)));
    }

    #[test]
    fn unknown_listing_is_a_validation_failure() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let error = engine
            .purchase(ShopItemId(99), &player_with_gold(500))
            .expect_err("missing item");

        assert_eq!(error.error, PurchaseError::ItemNotFound(ShopItemId(99)));
    }

    #[test]
    fn purchase_never_overdraws() {
        let fixture = {
            let mut fixture = Fixture::new();
            for (id, cost, discount) in [(10, 1, 0), (11, 333, 33), (12, 1000, 99), (13, 7, 100)] {
                fixture.add_item(id, cost, discount, CurrencyKind::Gold, Reward::Gems(1));
            }
            fixture
        };
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        for gold in [0, 1, 6, 10, 223, 500] {
            for id in 10..=13 {
                let before = player_with_gold(gold);
                match engine.purchase(ShopItemId(id), &before) {
                    Ok(committed) => assert_eq!(
                        committed.state.currencies.gold,
                        gold - committed.outcome.price.amount
                    ),
                    Err(_) => assert_eq!(before.currencies.gold, gold),
                }
            }
        }
    }
}
