//! Currency and consumable balances.
//!
//! Balances are unsigned, so the non-negative invariant holds by
//! construction; every debit goes through a checked subtraction that leaves
//! the balance untouched on failure.

/// Currency a shop listing is priced in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CurrencyKind {
    Gold,
    Gems,
    /// Real-money placeholder. Never held as a balance; payment is handled
    /// by an external processor. Amounts are expressed in cents.
    Usd,
}

impl CurrencyKind {
    /// Returns true if the player holds a balance of this currency.
    pub const fn is_balance(self) -> bool {
        matches!(self, Self::Gold | Self::Gems)
    }
}

/// Consumable the player holds a count of.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumableKind {
    HealthPotion,
    LevelUpPotion,
}

/// In-game currency balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Currencies {
    pub gold: u32,
    pub gems: u32,
}

impl Currencies {
    pub const fn new(gold: u32, gems: u32) -> Self {
        Self { gold, gems }
    }

    /// Balance held in `kind`, or `None` for currencies that are not held.
    pub const fn balance(&self, kind: CurrencyKind) -> Option<u32> {
        match kind {
            CurrencyKind::Gold => Some(self.gold),
            CurrencyKind::Gems => Some(self.gems),
            CurrencyKind::Usd => None,
        }
    }

    fn slot_mut(&mut self, kind: CurrencyKind) -> Option<&mut u32> {
        match kind {
            CurrencyKind::Gold => Some(&mut self.gold),
            CurrencyKind::Gems => Some(&mut self.gems),
            CurrencyKind::Usd => None,
        }
    }

    /// Removes `amount` from the balance of `kind`.
    ///
    /// Returns the balance actually available when it does not cover the
    /// amount; the balance is left unchanged in that case. Debiting a currency
    /// that is not held is a no-op.
    pub fn debit(&mut self, kind: CurrencyKind, amount: u32) -> Result<(), u32> {
        let Some(slot) = self.slot_mut(kind) else {
            return Ok(());
        };
        match slot.checked_sub(amount) {
            Some(remaining) => {
                *slot = remaining;
                Ok(())
            }
            None => Err(*slot),
        }
    }

    /// Adds `amount` to the balance of `kind`, saturating at `u32::MAX`.
    pub fn credit(&mut self, kind: CurrencyKind, amount: u32) {
        if let Some(slot) = self.slot_mut(kind) {
            *slot = slot.saturating_add(amount);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Consumable counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumables {
    pub health_potions: u32,
    pub level_up_potions: u32,
}

impl Consumables {
    pub const fn new(health_potions: u32, level_up_potions: u32) -> Self {
        Self {
            health_potions,
            level_up_potions,
        }
    }

    pub const fn count(&self, kind: ConsumableKind) -> u32 {
        match kind {
            ConsumableKind::HealthPotion => self.health_potions,
            ConsumableKind::LevelUpPotion => self.level_up_potions,
        }
    }

    fn slot_mut(&mut self, kind: ConsumableKind) -> &mut u32 {
        match kind {
            ConsumableKind::HealthPotion => &mut self.health_potions,
            ConsumableKind::LevelUpPotion => &mut self.level_up_potions,
        }
    }

    /// Removes `amount` of `kind`. On shortfall returns the available count
    /// and leaves it unchanged.
    pub fn consume(&mut self, kind: ConsumableKind, amount: u32) -> Result<(), u32> {
        let slot = self.slot_mut(kind);
        match slot.checked_sub(amount) {
            Some(remaining) => {
                *slot = remaining;
                Ok(())
            }
            None => Err(*slot),
        }
    }

    pub fn add(&mut self, kind: ConsumableKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_leaves_balance_untouched_on_shortfall() {
        let mut currencies = Currencies::new(10, 0);
        assert_eq!(currencies.debit(CurrencyKind::Gold, 100), Err(10));
        assert_eq!(currencies.gold, 10);

        currencies.debit(CurrencyKind::Gold, 10).unwrap();
        assert_eq!(currencies.gold, 0);
    }

    #[test]
    fn usd_is_never_held() {
        let mut currencies = Currencies::new(1, 2);
        currencies.credit(CurrencyKind::Usd, 500);
        assert_eq!(currencies.balance(CurrencyKind::Usd), None);
        assert_eq!(currencies.debit(CurrencyKind::Usd, 500), Ok(()));
        assert_eq!(currencies, Currencies::new(1, 2));
    }

    #[test]
    fn credit_saturates() {
        let mut consumables = Consumables::new(u32::MAX - 1, 0);
        consumables.add(ConsumableKind::HealthPotion, 5);
        assert_eq!(consumables.health_potions, u32::MAX);
    }
}
