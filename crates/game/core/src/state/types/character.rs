//! Owned characters and their gear slots.

use crate::config::GameConfig;
use crate::state::types::{CharacterId, EquipmentId};

/// Fixed-size ordered gear slots of one character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GearSlots([Option<EquipmentId>; GameConfig::GEAR_SLOTS]);

impl GearSlots {
    pub const fn empty() -> Self {
        Self([None; GameConfig::GEAR_SLOTS])
    }

    pub const fn from_slots(slots: [Option<EquipmentId>; GameConfig::GEAR_SLOTS]) -> Self {
        Self(slots)
    }

    /// Equipment in `slot`, or `None` when empty or out of range.
    pub fn get(&self, slot: usize) -> Option<EquipmentId> {
        self.0.get(slot).copied().flatten()
    }

    /// Puts `equipment` into `slot`, returning whatever was there before.
    ///
    /// Returns `Err` with the equipment back when the slot is out of range.
    pub fn set(
        &mut self,
        slot: usize,
        equipment: Option<EquipmentId>,
    ) -> Result<Option<EquipmentId>, Option<EquipmentId>> {
        match self.0.get_mut(slot) {
            Some(cell) => Ok(core::mem::replace(cell, equipment)),
            None => Err(equipment),
        }
    }

    /// Empties `slot`, returning its previous content.
    pub fn take(&mut self, slot: usize) -> Option<EquipmentId> {
        self.0.get_mut(slot).and_then(Option::take)
    }

    /// Index of the slot holding `equipment`.
    pub fn position(&self, equipment: EquipmentId) -> Option<usize> {
        self.0.iter().position(|slot| *slot == Some(equipment))
    }

    /// First empty slot, if any.
    pub fn first_empty(&self) -> Option<usize> {
        self.0.iter().position(Option::is_none)
    }

    /// Iterates `(slot, equipment)` over occupied slots.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, EquipmentId)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(slot, equipment)| equipment.map(|id| (slot, id)))
    }

    pub fn as_slice(&self) -> &[Option<EquipmentId>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Progress of one owned character.
///
/// Base stats live in the catalog (`CharacterDefinition`); only the mutable
/// part is kept here. The level has no public setter: it grows through
/// [`crate::progression::increment_level`] and is zeroed only by the
/// debug reset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: CharacterId,
    #[cfg_attr(feature = "serde", serde(default))]
    level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gear: GearSlots,
}

impl CharacterState {
    /// A freshly recruited character at level 0 with no gear.
    pub fn new(id: CharacterId) -> Self {
        Self::at_level(id, 0)
    }

    /// A character restored at a known level.
    pub fn at_level(id: CharacterId, level: u32) -> Self {
        Self {
            id,
            level,
            gear: GearSlots::empty(),
        }
    }

    pub fn with_gear(mut self, gear: GearSlots) -> Self {
        self.gear = gear;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    pub(crate) fn reset_level(&mut self) {
        self.level = 0;
    }
}
