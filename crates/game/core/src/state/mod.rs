//! Authoritative player-state representation.
//!
//! This module owns the aggregate that the economy and progression engines
//! transform. Runtime layers hold it behind a single owner and hand out read
//! snapshots; every mutation flows through [`crate::economy::EconomyEngine`].
mod error;
pub mod types;

use std::collections::BTreeSet;

pub use error::InvariantViolation;
pub use types::{
    CharacterId, CharacterState, ConsumableKind, Consumables, Currencies, CurrencyKind,
    EquipmentId, GearSlots, InventoryState, LevelId, MailFlags, MailState, MessageId, Settings,
    ShopItemId,
};

use crate::catalog::{Catalog, EquipmentDefinition, EquipmentOracle, MailOracle, MailTemplate};
use crate::config::GameConfig;

/// The single shared player aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerState {
    pub currencies: Currencies,
    pub consumables: Consumables,
    pub inventory: InventoryState,
    /// Owned characters in roster order.
    pub characters: Vec<CharacterState>,
    pub settings: Settings,
    pub mailbox: Vec<MailState>,
}

impl PlayerState {
    pub const STARTING_GOLD: u32 = 500;
    pub const STARTING_GEMS: u32 = 50;
    pub const STARTING_HEALTH_POTIONS: u32 = 6;
    pub const STARTING_LEVEL_UP_POTIONS: u32 = 80;

    /// Builds the aggregate for a new game from catalog data.
    ///
    /// Missing oracles degrade to empty rosters rather than failing; the
    /// starting balances and settings are always present.
    pub fn new_game(catalog: &Catalog<'_>, config: &GameConfig) -> Self {
        let mut state = Self {
            currencies: Currencies::new(Self::STARTING_GOLD, Self::STARTING_GEMS),
            consumables: Consumables::new(
                Self::STARTING_HEALTH_POTIONS,
                Self::STARTING_LEVEL_UP_POTIONS,
            ),
            ..Self::default()
        };

        if let Ok(equipment) = catalog.equipment() {
            state.inventory = InventoryState::new(
                equipment
                    .all_equipment()
                    .into_iter()
                    .take(config.starting_equipment)
                    .map(|definition| definition.id),
            );
        }

        if let Ok(characters) = catalog.characters() {
            for definition in characters
                .all_characters()
                .into_iter()
                .take(config.starting_characters)
            {
                let mut character = CharacterState::new(definition.id);
                for equipment in definition.default_gear {
                    if !state.inventory.owns(equipment) || state.wearer_of(equipment).is_some() {
                        continue;
                    }
                    if let Some(slot) = character.gear.first_empty() {
                        let _ = character.gear.set(slot, Some(equipment));
                    }
                }
                state.characters.push(character);
            }
        }

        if let Ok(mail) = catalog.mail() {
            state.mailbox = mail
                .all_templates()
                .into_iter()
                .map(|template| {
                    let mut flags = MailFlags::empty();
                    flags.set(MailFlags::READ, !template.starts_new);
                    flags.set(MailFlags::DELETED, template.starts_deleted);
                    MailState::with_flags(template.id, flags)
                })
                .collect();
        }

        state
    }

    pub fn character(&self, id: CharacterId) -> Option<&CharacterState> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut CharacterState> {
        self.characters.iter_mut().find(|character| character.id == id)
    }

    pub fn message(&self, id: MessageId) -> Option<&MailState> {
        self.mailbox.iter().find(|message| message.id == id)
    }

    pub fn message_mut(&mut self, id: MessageId) -> Option<&mut MailState> {
        self.mailbox.iter_mut().find(|message| message.id == id)
    }

    /// Character currently wearing `equipment`, with the slot index.
    pub fn wearer_of(&self, equipment: EquipmentId) -> Option<(CharacterId, usize)> {
        self.characters.iter().find_map(|character| {
            character
                .gear
                .position(equipment)
                .map(|slot| (character.id, slot))
        })
    }

    /// Owned equipment not worn by any character, in id order.
    pub fn unequipped_gear(&self) -> Vec<EquipmentId> {
        let worn: BTreeSet<EquipmentId> = self
            .characters
            .iter()
            .flat_map(|character| character.gear.occupied().map(|(_, id)| id))
            .collect();
        self.inventory
            .owned
            .iter()
            .copied()
            .filter(|id| !worn.contains(id))
            .collect()
    }

    /// Unequipped gear resolved against the catalog and filtered.
    ///
    /// Ids without a definition are skipped.
    pub fn unequipped_definitions(
        &self,
        oracle: &dyn EquipmentOracle,
        filter: crate::catalog::GearFilter,
    ) -> Vec<EquipmentDefinition> {
        self.unequipped_gear()
            .into_iter()
            .filter_map(|id| oracle.equipment(id))
            .filter(|definition| filter.matches(definition))
            .collect()
    }

    /// Inbox (`deleted == false`) or trash (`deleted == true`) messages with
    /// their templates, newest first. Messages without a template are skipped.
    pub fn mail_folder(&self, oracle: &dyn MailOracle, deleted: bool) -> Vec<MailEntry> {
        let mut entries: Vec<MailEntry> = self
            .mailbox
            .iter()
            .filter(|message| message.is_deleted() == deleted)
            .filter_map(|message| {
                oracle.template(message.id).map(|template| MailEntry {
                    state: *message,
                    template,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.template
                .date
                .cmp(&a.template.date)
                .then_with(|| a.state.id.cmp(&b.state.id))
        });
        entries
    }

    /// Sum of all character levels (unclamped).
    pub fn total_levels(&self) -> u64 {
        self.characters
            .iter()
            .map(|character| u64::from(character.level()))
            .sum()
    }

    /// Verifies the structural invariants of the aggregate.
    ///
    /// Balance non-negativity is guaranteed by the unsigned types and is not
    /// re-checked here.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut characters = BTreeSet::new();
        let mut worn = BTreeSet::new();
        for character in &self.characters {
            if !characters.insert(character.id) {
                return Err(InvariantViolation::DuplicateCharacter(character.id));
            }
            for (_, equipment) in character.gear.occupied() {
                if !worn.insert(equipment) {
                    return Err(InvariantViolation::EquipmentWornTwice { equipment });
                }
                if !self.inventory.owns(equipment) {
                    return Err(InvariantViolation::WornButNotOwned {
                        equipment,
                        character: character.id,
                    });
                }
            }
        }

        let mut messages = BTreeSet::new();
        for message in &self.mailbox {
            if !messages.insert(message.id) {
                return Err(InvariantViolation::DuplicateMessage(message.id));
            }
        }

        Ok(())
    }
}

/// A mailbox record joined with its template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailEntry {
    pub state: MailState,
    pub template: MailTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character_with(id: u32, gear: [Option<u32>; GameConfig::GEAR_SLOTS]) -> CharacterState {
        CharacterState::new(CharacterId(id)).with_gear(GearSlots::from_slots(
            gear.map(|slot| slot.map(EquipmentId)),
        ))
    }

    #[test]
    fn unequipped_gear_excludes_worn_pieces() {
        let state = PlayerState {
            inventory: InventoryState::new([1, 2, 3].map(EquipmentId)),
            characters: vec![character_with(1, [Some(2), None, None, None])],
            ..PlayerState::default()
        };

        assert_eq!(state.unequipped_gear(), vec![EquipmentId(1), EquipmentId(3)]);
        assert_eq!(state.wearer_of(EquipmentId(2)), Some((CharacterId(1), 0)));
    }

    #[test]
    fn detects_gear_worn_by_two_characters() {
        let state = PlayerState {
            inventory: InventoryState::new([7].map(EquipmentId)),
            characters: vec![
                character_with(1, [Some(7), None, None, None]),
                character_with(2, [None, None, Some(7), None]),
            ],
            ..PlayerState::default()
        };

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::EquipmentWornTwice {
                equipment: EquipmentId(7)
            })
        );
    }

    #[test]
    fn detects_worn_gear_that_is_not_owned() {
        let state = PlayerState {
            characters: vec![character_with(4, [None, Some(9), None, None])],
            ..PlayerState::default()
        };

        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::WornButNotOwned { .. })
        ));
    }

    #[test]
    fn unequipped_definitions_filter_by_rarity_and_type() {
        use crate::catalog::{EquipmentType, GearFilter, Rarity};
        use crate::economy::test_support::Fixture;

        let mut fixture = Fixture::new();
        if let Some(piece) = fixture.equipment.get_mut(&EquipmentId(4)) {
            piece.rarity = Rarity::Rare;
        }
        let state = PlayerState {
            inventory: InventoryState::new([1, 2, 4, 5].map(EquipmentId)),
            characters: vec![character_with(1, [Some(2), None, None, None])],
            ..PlayerState::default()
        };
        let ids = |filter| {
            state
                .unequipped_definitions(&fixture, filter)
                .into_iter()
                .map(|piece| piece.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(GearFilter::ALL), [1, 4, 5].map(EquipmentId));
        assert_eq!(
            ids(GearFilter {
                equipment_type: Some(EquipmentType::Weapon),
                ..GearFilter::ALL
            }),
            [1, 4].map(EquipmentId)
        );
        assert_eq!(
            ids(GearFilter {
                rarity: Some(Rarity::Rare),
                ..GearFilter::ALL
            }),
            [EquipmentId(4)]
        );
        assert!(
            ids(GearFilter {
                rarity: Some(Rarity::Rare),
                equipment_type: Some(EquipmentType::Boots),
            })
            .is_empty()
        );
    }

    #[test]
    fn mail_folders_split_deleted_and_sort_newest_first() {
        use chrono::NaiveDate;

        use crate::economy::test_support::Fixture;

        let mut fixture = Fixture::new();
        let date = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        for (id, day) in [(3, 2), (4, 1)] {
            fixture.mail.insert(
                MessageId(id),
                MailTemplate::new(MessageId(id), "Guild", "Notice", date(day)),
            );
        }
        let state = PlayerState {
            mailbox: vec![
                MailState::new(MessageId(1)),
                MailState::new(MessageId(3)),
                MailState::new(MessageId(2)),
                MailState::with_flags(MessageId(4), MailFlags::DELETED | MailFlags::READ),
                MailState::new(MessageId(99)),
            ],
            ..PlayerState::default()
        };
        let ids = |deleted| {
            state
                .mail_folder(&fixture, deleted)
                .into_iter()
                .map(|entry| entry.state.id)
                .collect::<Vec<_>>()
        };

        // Same date falls back to ascending id; 99 has no template.
        assert_eq!(ids(false), [2, 3, 1].map(MessageId));
        assert_eq!(ids(true), [MessageId(4)]);
    }

    #[test]
    fn new_game_without_catalog_keeps_starting_balances() {
        let state = PlayerState::new_game(&Catalog::empty(), &GameConfig::default());

        assert_eq!(state.currencies, Currencies::new(500, 50));
        assert_eq!(state.consumables, Consumables::new(6, 80));
        assert_eq!(state.settings.username, "GUEST_123456");
        assert!(state.characters.is_empty());
        assert!(state.check_invariants().is_ok());
    }
}
