use crate::state::types::{ConsumableKind, CurrencyKind, EquipmentId};

/// Content credited by a purchase or a mail gift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reward {
    Gold(u32),
    Gems(u32),
    HealthPotions(u32),
    LevelUpPotions(u32),
    /// One unique equipment piece.
    Equipment(EquipmentId),
}

impl Reward {
    /// Currency credited by this reward, if any.
    pub const fn currency(&self) -> Option<CurrencyKind> {
        match self {
            Self::Gold(_) => Some(CurrencyKind::Gold),
            Self::Gems(_) => Some(CurrencyKind::Gems),
            _ => None,
        }
    }

    /// Consumable credited by this reward, if any.
    pub const fn consumable(&self) -> Option<ConsumableKind> {
        match self {
            Self::HealthPotions(_) => Some(ConsumableKind::HealthPotion),
            Self::LevelUpPotions(_) => Some(ConsumableKind::LevelUpPotion),
            _ => None,
        }
    }

    /// Quantity credited; equipment counts as one piece.
    pub const fn quantity(&self) -> u32 {
        match self {
            Self::Gold(value)
            | Self::Gems(value)
            | Self::HealthPotions(value)
            | Self::LevelUpPotions(value) => *value,
            Self::Equipment(_) => 1,
        }
    }
}
