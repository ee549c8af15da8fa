/// Tunable rules for the economy and progression engines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Linear multiplier of the level-up potion cost curve. Values below 1 are
    /// treated as 1.
    pub progression_factor: u32,

    /// When set, equipping gear clears any other slot of the same character
    /// that holds the same equipment type.
    pub unequip_duplicate_gear_type: bool,

    /// Number of catalog characters owned by a new game.
    pub starting_characters: usize,

    /// Number of catalog equipment pieces owned by a new game.
    pub starting_equipment: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Gear slots per character.
    pub const GEAR_SLOTS: usize = 4;
    /// Upper clamp of the aggregated level meter.
    pub const MAX_METER_LEVEL: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PROGRESSION_FACTOR: u32 = 10;
    pub const DEFAULT_STARTING_CHARACTERS: usize = 3;
    pub const DEFAULT_STARTING_EQUIPMENT: usize = 3;

    pub fn new() -> Self {
        Self {
            progression_factor: Self::DEFAULT_PROGRESSION_FACTOR,
            unequip_duplicate_gear_type: false,
            starting_characters: Self::DEFAULT_STARTING_CHARACTERS,
            starting_equipment: Self::DEFAULT_STARTING_EQUIPMENT,
        }
    }

    pub fn with_progression_factor(progression_factor: u32) -> Self {
        Self {
            progression_factor,
            ..Self::new()
        }
    }

    /// Progression factor after the floor clamp.
    pub fn effective_progression_factor(&self) -> u32 {
        self.progression_factor.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
