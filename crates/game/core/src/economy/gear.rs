//! Equip and unequip transactions behind the inventory overlay.

use std::collections::HashSet;

use crate::catalog::{EquipmentType, OracleError};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    CharacterId, CharacterState, EquipmentId, GearSlots, InvariantViolation, PlayerState,
};

use super::transaction::{EconomyEnv, Transaction};

/// Gear of one character after a successful gear transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GearReceipt {
    pub character: CharacterId,
    pub gear: GearSlots,
    /// Pieces returned to the unequipped pool.
    pub unequipped: Vec<EquipmentId>,
    /// Pieces newly put on.
    pub equipped: Vec<EquipmentId>,
}

impl GearReceipt {
    fn new(character: &CharacterState) -> Self {
        Self {
            character: character.id,
            gear: character.gear,
            unequipped: Vec::new(),
            equipped: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GearError {
    #[error("character {0} is not owned")]
    CharacterNotFound(CharacterId),

    #[error("gear slot {slot} out of range (max {max})")]
    SlotOutOfRange { slot: usize, max: usize },

    #[error("gear slot {0} is empty")]
    SlotEmpty(usize),

    #[error("equipment {0} is not owned")]
    NotOwned(EquipmentId),

    #[error("equipment {equipment} is already worn by {wearer}")]
    AlreadyEquipped {
        equipment: EquipmentId,
        wearer: CharacterId,
    },

    #[error("equipment {0} has no catalog definition")]
    UnknownEquipment(EquipmentId),

    #[error(transparent)]
    Catalog(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for GearError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEquipment(_) => ErrorSeverity::DataIntegrity,
            Self::Catalog(error) => error.severity(),
            Self::Invariant(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CharacterNotFound(_) => "GEAR_CHARACTER_NOT_FOUND",
            Self::SlotOutOfRange { .. } => "GEAR_SLOT_OUT_OF_RANGE",
            Self::SlotEmpty(_) => "GEAR_SLOT_EMPTY",
            Self::NotOwned(_) => "GEAR_NOT_OWNED",
            Self::AlreadyEquipped { .. } => "GEAR_ALREADY_EQUIPPED",
            Self::UnknownEquipment(_) => "GEAR_UNKNOWN_EQUIPMENT",
            Self::Catalog(error) => error.error_code(),
            Self::Invariant(error) => error.error_code(),
        }
    }
}

fn check_slot(slot: usize) -> Result<(), GearError> {
    if slot >= GameConfig::GEAR_SLOTS {
        return Err(GearError::SlotOutOfRange {
            slot,
            max: GameConfig::GEAR_SLOTS,
        });
    }
    Ok(())
}

fn character<'s>(state: &'s PlayerState, id: CharacterId) -> Result<&'s CharacterState, GearError> {
    state.character(id).ok_or(GearError::CharacterNotFound(id))
}

fn character_mut<'s>(
    state: &'s mut PlayerState,
    id: CharacterId,
) -> Result<&'s mut CharacterState, GearError> {
    state.character_mut(id).ok_or(GearError::CharacterNotFound(id))
}

fn equipment_type(env: &EconomyEnv<'_>, id: EquipmentId) -> Result<Option<EquipmentType>, GearError> {
    Ok(env
        .catalog
        .equipment()?
        .equipment(id)
        .map(|definition| definition.equipment_type))
}

/// Puts an owned, unworn piece into one slot.
///
/// A piece already in the slot goes back to the pool. With
/// `unequip_duplicate_gear_type` on, other slots holding the same
/// equipment type are cleared first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipGear {
    pub character: CharacterId,
    pub slot: usize,
    pub equipment: EquipmentId,
}

impl EquipGear {
    pub fn new(character: CharacterId, slot: usize, equipment: EquipmentId) -> Self {
        Self {
            character,
            slot,
            equipment,
        }
    }
}

impl Transaction for EquipGear {
    type Output = GearReceipt;
    type Error = GearError;

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        character(state, self.character)?;
        check_slot(self.slot)?;
        if !state.inventory.owns(self.equipment) {
            return Err(GearError::NotOwned(self.equipment));
        }
        if let Some((wearer, _)) = state.wearer_of(self.equipment) {
            return Err(GearError::AlreadyEquipped {
                equipment: self.equipment,
                wearer,
            });
        }
        if env.config.unequip_duplicate_gear_type && equipment_type(env, self.equipment)?.is_none()
        {
            return Err(GearError::UnknownEquipment(self.equipment));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let mut duplicates = Vec::new();
        if env.config.unequip_duplicate_gear_type {
            let incoming = equipment_type(env, self.equipment)?;
            for (slot, worn) in character(state, self.character)?.gear.occupied() {
                if slot != self.slot && equipment_type(env, worn)? == incoming {
                    duplicates.push(slot);
                }
            }
        }

        let record = character_mut(state, self.character)?;
        let mut receipt = GearReceipt::new(record);
        for slot in duplicates {
            receipt.unequipped.extend(record.gear.take(slot));
        }
        let previous = record
            .gear
            .set(self.slot, Some(self.equipment))
            .map_err(|_| GearError::SlotOutOfRange {
                slot: self.slot,
                max: GameConfig::GEAR_SLOTS,
            })?;
        receipt.unequipped.extend(previous);
        receipt.equipped.push(self.equipment);
        receipt.gear = record.gear;
        Ok(receipt)
    }
}

/// Empties one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipSlot {
    pub character: CharacterId,
    pub slot: usize,
}

impl UnequipSlot {
    pub fn new(character: CharacterId, slot: usize) -> Self {
        Self { character, slot }
    }
}

impl Transaction for UnequipSlot {
    type Output = GearReceipt;
    type Error = GearError;

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        check_slot(self.slot)?;
        if character(state, self.character)?.gear.get(self.slot).is_none() {
            return Err(GearError::SlotEmpty(self.slot));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let record = character_mut(state, self.character)?;
        let removed = record
            .gear
            .take(self.slot)
            .ok_or(GearError::SlotEmpty(self.slot))?;
        let mut receipt = GearReceipt::new(record);
        receipt.unequipped.push(removed);
        Ok(receipt)
    }
}

/// Empties every slot of one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipAll {
    pub character: CharacterId,
}

impl UnequipAll {
    pub fn new(character: CharacterId) -> Self {
        Self { character }
    }
}

impl Transaction for UnequipAll {
    type Output = GearReceipt;
    type Error = GearError;

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        character(state, self.character).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let record = character_mut(state, self.character)?;
        let removed: Vec<EquipmentId> = (0..GameConfig::GEAR_SLOTS)
            .filter_map(|slot| record.gear.take(slot))
            .collect();
        let mut receipt = GearReceipt::new(record);
        receipt.unequipped = removed;
        Ok(receipt)
    }
}

/// Fills empty slots, in slot order, from the unequipped pool in id order.
///
/// With `unequip_duplicate_gear_type` on, a piece whose type is already worn
/// is skipped, and so is a piece without a catalog definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoEquip {
    pub character: CharacterId,
}

impl AutoEquip {
    pub fn new(character: CharacterId) -> Self {
        Self { character }
    }
}

impl Transaction for AutoEquip {
    type Output = GearReceipt;
    type Error = GearError;

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        character(state, self.character).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let unique_types = env.config.unequip_duplicate_gear_type;
        let pool = state.unequipped_gear();

        let mut worn_types = HashSet::new();
        if unique_types {
            for (_, worn) in character(state, self.character)?.gear.occupied() {
                worn_types.extend(equipment_type(env, worn)?);
            }
        }

        let mut empty_slots = character(state, self.character)?
            .gear
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, worn)| worn.is_none())
            .map(|(slot, _)| slot)
            .collect::<Vec<_>>()
            .into_iter();
        let mut picks = Vec::new();
        for candidate in pool {
            if unique_types {
                match equipment_type(env, candidate)? {
                    Some(kind) if worn_types.insert(kind) => {}
                    _ => continue,
                }
            }
            match empty_slots.next() {
                Some(slot) => picks.push((slot, candidate)),
                None => break,
            }
        }

        let record = character_mut(state, self.character)?;
        let mut receipt = GearReceipt::new(record);
        for (slot, equipment) in picks {
            record
                .gear
                .set(slot, Some(equipment))
                .map_err(|_| GearError::SlotOutOfRange {
                    slot,
                    max: GameConfig::GEAR_SLOTS,
                })?;
            receipt.equipped.push(equipment);
        }
        receipt.gear = record.gear;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::EconomyEngine;
    use crate::economy::test_support::Fixture;
    use crate::state::InventoryState;

    fn roster() -> PlayerState {
        PlayerState {
            inventory: InventoryState::new([1, 2, 3, 4].map(EquipmentId)),
            characters: vec![
                CharacterState::new(CharacterId(1)),
                CharacterState::new(CharacterId(2)),
            ],
            ..PlayerState::default()
        }
    }

    #[test]
    fn equip_swaps_out_previous_piece() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let first = engine
            .equip(CharacterId(1), 0, EquipmentId(1), &roster())
            .expect("equip");
        let second = engine
            .equip(CharacterId(1), 0, EquipmentId(2), &first.state)
            .expect("swap");

        assert_eq!(second.outcome.unequipped, vec![EquipmentId(1)]);
        assert_eq!(second.outcome.gear.get(0), Some(EquipmentId(2)));
        assert!(second.state.unequipped_gear().contains(&EquipmentId(1)));
    }

    #[test]
    fn worn_piece_cannot_be_equipped_by_someone_else() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let first = engine
            .equip(CharacterId(1), 0, EquipmentId(1), &roster())
            .expect("equip");
        let error = engine
            .equip(CharacterId(2), 1, EquipmentId(1), &first.state)
            .expect_err("single owner");

        assert_eq!(
            error.error,
            GearError::AlreadyEquipped {
                equipment: EquipmentId(1),
                wearer: CharacterId(1)
            }
        );
    }

    #[test]
    fn duplicate_type_is_unequipped_when_enabled() {
        let fixture = Fixture::new();
        let config = GameConfig {
            unequip_duplicate_gear_type: true,
            ..GameConfig::default()
        };
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        // 1 and 4 are both weapons.
        let first = engine
            .equip(CharacterId(1), 0, EquipmentId(1), &roster())
            .expect("equip");
        let second = engine
            .equip(CharacterId(1), 2, EquipmentId(4), &first.state)
            .expect("equip duplicate type");

        assert_eq!(second.outcome.unequipped, vec![EquipmentId(1)]);
        assert_eq!(second.outcome.gear.get(0), None);
        assert_eq!(second.outcome.gear.get(2), Some(EquipmentId(4)));
    }

    #[test]
    fn unowned_piece_and_bad_slot_are_rejected() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let not_owned = engine
            .equip(CharacterId(1), 0, EquipmentId(5), &roster())
            .expect_err("not owned");
        assert_eq!(not_owned.error, GearError::NotOwned(EquipmentId(5)));

        let bad_slot = engine
            .equip(CharacterId(1), 4, EquipmentId(1), &roster())
            .expect_err("slot");
        assert!(matches!(bad_slot.error, GearError::SlotOutOfRange { slot: 4, .. }));
    }

    #[test]
    fn auto_equip_fills_empty_slots_in_order() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let committed = engine.auto_equip(CharacterId(1), &roster()).expect("auto");
        assert_eq!(
            committed.outcome.gear.as_slice(),
            &[1, 2, 3, 4].map(|id| Some(EquipmentId(id)))
        );
        assert!(committed.state.unequipped_gear().is_empty());
    }

    #[test]
    fn auto_equip_skips_duplicate_types_when_enabled() {
        let fixture = Fixture::new();
        let config = GameConfig {
            unequip_duplicate_gear_type: true,
            ..GameConfig::default()
        };
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let committed = engine.auto_equip(CharacterId(1), &roster()).expect("auto");
        assert_eq!(
            committed.outcome.equipped,
            vec![EquipmentId(1), EquipmentId(2), EquipmentId(3)]
        );
        assert_eq!(committed.state.unequipped_gear(), vec![EquipmentId(4)]);
    }

    #[test]
    fn unequip_all_returns_everything() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let equipped = engine.auto_equip(CharacterId(1), &roster()).expect("auto");
        let cleared = engine
            .unequip_all(CharacterId(1), &equipped.state)
            .expect("unequip all");

        assert!(cleared.outcome.gear.is_empty());
        assert_eq!(cleared.outcome.unequipped.len(), 4);

        let error = engine
            .unequip(CharacterId(1), 0, &cleared.state)
            .expect_err("empty slot");
        assert_eq!(error.error, GearError::SlotEmpty(0));
    }
}
