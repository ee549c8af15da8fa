use crate::catalog::Rarity;
use crate::state::types::{CharacterId, EquipmentId};

pub trait CharacterOracle: Send + Sync {
    fn character(&self, id: CharacterId) -> Option<CharacterDefinition>;

    /// Every definition, ordered by id.
    fn all_characters(&self) -> Vec<CharacterDefinition>;
}

/// Immutable base stats of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub life: u32,
    pub crit: u32,
}

impl BaseStats {
    pub const fn new(attack: u32, defense: u32, life: u32, crit: u32) -> Self {
        Self {
            attack,
            defense,
            life,
            crit,
        }
    }

    /// Sum of the four stats that feed the power score.
    pub const fn total(&self) -> u64 {
        self.attack as u64 + self.defense as u64 + self.life as u64 + self.crit as u64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDefinition {
    pub id: CharacterId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: String,
    pub rarity: Rarity,
    pub base_stats: BaseStats,
    /// Gear equipped on a new game when the player owns it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_gear: Vec<EquipmentId>,
    /// Skill names shown on the stats panel. Empty means the definition is
    /// incomplete and the panel skips the section.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
}

impl CharacterDefinition {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        rarity: Rarity,
        base_stats: BaseStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            class: String::new(),
            rarity,
            base_stats,
            default_gear: Vec::new(),
            skills: Vec::new(),
        }
    }
}
