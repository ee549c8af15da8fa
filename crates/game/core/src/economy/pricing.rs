//! Discounted pricing with per-currency rounding.

use core::fmt;

use crate::state::CurrencyKind;

/// Largest discount that has an effect; larger values clamp to a free item.
pub const MAX_DISCOUNT: u32 = 100;

/// An amount in a specific currency.
///
/// Gold and gems are whole units. `Usd` amounts are cents, so the
/// two-decimal real-money price is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price {
    pub currency: CurrencyKind,
    pub amount: u32,
}

impl Price {
    pub const fn new(currency: CurrencyKind, amount: u32) -> Self {
        Self { currency, amount }
    }

    pub const fn is_free(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency {
            CurrencyKind::Usd => write!(f, "${}.{:02}", self.amount / 100, self.amount % 100),
            CurrencyKind::Gold | CurrencyKind::Gems => {
                write!(f, "{} {}", self.amount, self.currency)
            }
        }
    }
}

/// Computes `cost * (100 - discount) / 100` in `currency`.
///
/// Gold and gems truncate toward zero. Real-money cents round half up. The
/// match is exhaustive so a new currency kind fails to compile until its
/// rounding rule is chosen.
pub fn discounted_price(cost: u32, discount: u32, currency: CurrencyKind) -> Price {
    let kept = u64::from(MAX_DISCOUNT - discount.min(MAX_DISCOUNT));
    let scaled = u64::from(cost) * kept;
    let amount = match currency {
        CurrencyKind::Gold | CurrencyKind::Gems => scaled / 100,
        CurrencyKind::Usd => (scaled + 50) / 100,
    };
    // amount <= cost, so the conversion cannot fail.
    Price::new(currency, u32::try_from(amount).unwrap_or(cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_off_gold() {
        assert_eq!(
            discounted_price(100, 50, CurrencyKind::Gold),
            Price::new(CurrencyKind::Gold, 50)
        );
    }

    #[test]
    fn in_game_currencies_truncate() {
        assert_eq!(discounted_price(99, 50, CurrencyKind::Gems).amount, 49);
        assert_eq!(discounted_price(7, 33, CurrencyKind::Gold).amount, 4);
    }

    #[test]
    fn real_money_rounds_cents_half_up() {
        // $4.99 at 50% off is 249.5 cents.
        let price = discounted_price(499, 50, CurrencyKind::Usd);
        assert_eq!(price.amount, 250);
        assert_eq!(price.to_string(), "$2.50");
    }

    #[test]
    fn discount_above_hundred_is_free() {
        assert!(discounted_price(100, 250, CurrencyKind::Gold).is_free());
    }

    #[test]
    fn no_discount_keeps_cost() {
        assert_eq!(discounted_price(u32::MAX, 0, CurrencyKind::Gold).amount, u32::MAX);
    }
}
