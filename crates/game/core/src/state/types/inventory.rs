//! Owned equipment.

use std::collections::BTreeSet;

use crate::state::types::EquipmentId;

/// Every equipment piece the player owns, worn or not.
///
/// Which pieces are worn is recorded in each character's gear slots; the
/// unequipped pool is derived as owned minus worn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InventoryState {
    pub owned: BTreeSet<EquipmentId>,
}

impl InventoryState {
    pub fn new(owned: impl IntoIterator<Item = EquipmentId>) -> Self {
        Self {
            owned: owned.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn owns(&self, equipment: EquipmentId) -> bool {
        self.owned.contains(&equipment)
    }

    /// Adds `equipment`; returns false if it was already owned.
    pub fn insert(&mut self, equipment: EquipmentId) -> bool {
        self.owned.insert(equipment)
    }
}
