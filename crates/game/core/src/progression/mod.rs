//! Level-up cost curve, power score and roster-wide progression.
//!
//! Everything here is a pure function of its arguments. The only state
//! mutation, [`increment_level`], is consumed by the level-up transaction in
//! [`crate::economy`].

mod rank;

pub use rank::{LevelMeter, Rank};

use crate::catalog::BaseStats;
use crate::config::GameConfig;
use crate::state::{CharacterId, CharacterState, ConsumableKind, PlayerState};

/// Potions needed to go from `level` to `level + 1`.
///
/// `progression_factor * max(level, 1)` with the factor floor-clamped to 1.
/// Levels 0 and 1 cost the same.
pub fn potions_required_for_next_level(level: u32, progression_factor: u32) -> u32 {
    progression_factor.max(1).saturating_mul(level.max(1))
}

/// `floor(level * (attack + defense + life + crit) / 10)`.
///
/// Equipment bonuses do not contribute yet.
pub fn power_score(level: u32, stats: &BaseStats) -> u64 {
    u64::from(level).saturating_mul(stats.total()) / 10
}

/// Returns `character` one level higher.
pub fn increment_level(mut character: CharacterState) -> CharacterState {
    character.advance_level();
    character
}

/// Sum of all character levels, clamped to the meter range.
pub fn aggregate_progression<'a>(characters: impl IntoIterator<Item = &'a CharacterState>) -> u32 {
    let total: u64 = characters
        .into_iter()
        .map(|character| u64::from(character.level()))
        .sum();
    // Clamped above, so it always fits.
    total.min(u64::from(GameConfig::MAX_METER_LEVEL)) as u32
}

/// Whether `character` can afford its next level with the potions held.
///
/// Unknown characters cannot level up.
pub fn can_level_up(state: &PlayerState, character: CharacterId, config: &GameConfig) -> bool {
    state.character(character).is_some_and(|record| {
        potions_required_for_next_level(record.level(), config.progression_factor)
            <= state.consumables.count(ConsumableKind::LevelUpPotion)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cost_at_level_one_is_ten() {
        assert_eq!(
            potions_required_for_next_level(1, GameConfig::DEFAULT_PROGRESSION_FACTOR),
            10
        );
        assert_eq!(potions_required_for_next_level(0, 10), 10);
        assert_eq!(potions_required_for_next_level(7, 10), 70);
    }

    #[test]
    fn zero_factor_clamps_to_one() {
        assert_eq!(potions_required_for_next_level(5, 0), 5);
    }

    #[test]
    fn cost_is_monotonic_in_level() {
        let costs: Vec<u32> = (0..200)
            .map(|level| potions_required_for_next_level(level, 10))
            .collect();
        assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn power_score_floors() {
        let stats = BaseStats::new(10, 8, 40, 3);
        // 3 * 61 / 10 = 18.3
        assert_eq!(power_score(3, &stats), 18);
        assert_eq!(power_score(0, &stats), 0);
    }

    #[test]
    fn increment_adds_exactly_one_each_time() {
        let mut character = CharacterState::at_level(CharacterId(1), 4);
        for expected in 5..=25 {
            character = increment_level(character);
            assert_eq!(character.level(), expected);
        }
    }

    #[test]
    fn aggregate_clamps_to_meter_range() {
        let roster: Vec<_> = (1..=3)
            .map(|id| CharacterState::at_level(CharacterId(id), 40))
            .collect();
        assert_eq!(aggregate_progression(&roster), 100);
        assert_eq!(aggregate_progression(&roster[..1]), 40);
        assert_eq!(aggregate_progression(std::iter::empty()), 0);
    }

    #[test]
    fn can_level_up_compares_against_potions() {
        let mut state = PlayerState {
            characters: vec![CharacterState::at_level(CharacterId(1), 2)],
            ..PlayerState::default()
        };
        let config = GameConfig::default();

        state.consumables.level_up_potions = 19;
        assert!(!can_level_up(&state, CharacterId(1), &config));
        state.consumables.level_up_potions = 20;
        assert!(can_level_up(&state, CharacterId(1), &config));
        assert!(!can_level_up(&state, CharacterId(9), &config));
    }
}
