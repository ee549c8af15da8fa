use crate::error::{ErrorSeverity, GameError};
use crate::progression::{increment_level, potions_required_for_next_level};
use crate::state::{CharacterId, ConsumableKind, InvariantViolation, PlayerState};

use super::transaction::{EconomyEnv, Transaction};

/// Spends level-up potions to raise one character by exactly one level.
///
/// The debit and the increment happen in the same transaction, so a failed
/// level-up never consumes potions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub character: CharacterId,
}

impl LevelUp {
    pub fn new(character: CharacterId) -> Self {
        Self { character }
    }

    fn cost(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(u32, u32), LevelUpError> {
        let level = state
            .character(self.character)
            .ok_or(LevelUpError::CharacterNotFound(self.character))?
            .level();
        Ok((
            level,
            potions_required_for_next_level(level, env.config.progression_factor),
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpReceipt {
    pub character: CharacterId,
    pub potions_spent: u32,
    pub new_level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelUpError {
    #[error("character {0} is not owned")]
    CharacterNotFound(CharacterId),

    #[error("insufficient level-up potions: need {required}, have {available}")]
    InsufficientPotions { required: u32, available: u32 },

    #[error("level did not advance by exactly one (from {before} to {after})")]
    LevelNotAdvanced { before: u32, after: u32 },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for LevelUpError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CharacterNotFound(_) | Self::InsufficientPotions { .. } => {
                ErrorSeverity::Validation
            }
            Self::LevelNotAdvanced { .. } => ErrorSeverity::Internal,
            Self::Invariant(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CharacterNotFound(_) => "LEVEL_UP_CHARACTER_NOT_FOUND",
            Self::InsufficientPotions { .. } => "LEVEL_UP_INSUFFICIENT_POTIONS",
            Self::LevelNotAdvanced { .. } => "LEVEL_UP_NOT_ADVANCED",
            Self::Invariant(error) => error.error_code(),
        }
    }
}

impl Transaction for LevelUp {
    type Output = LevelUpReceipt;
    type Error = LevelUpError;

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        let (_, required) = self.cost(state, env)?;
        let available = state.consumables.count(ConsumableKind::LevelUpPotion);
        if available < required {
            return Err(LevelUpError::InsufficientPotions {
                required,
                available,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let (level, required) = self.cost(state, env)?;
        state
            .consumables
            .consume(ConsumableKind::LevelUpPotion, required)
            .map_err(|available| LevelUpError::InsufficientPotions {
                required,
                available,
            })?;

        let index = state
            .characters
            .iter()
            .position(|character| character.id == self.character)
            .ok_or(LevelUpError::CharacterNotFound(self.character))?;
        let advanced = increment_level(state.characters[index].clone());
        let new_level = advanced.level();
        state.characters[index] = advanced;

        if level.checked_add(1) != Some(new_level) {
            return Err(LevelUpError::LevelNotAdvanced {
                before: level,
                after: new_level,
            });
        }

        Ok(LevelUpReceipt {
            character: self.character,
            potions_spent: required,
            new_level,
        })
    }
}

/// Sets every character back to level 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetLevels;

impl Transaction for ResetLevels {
    type Output = ();
    type Error = InvariantViolation;

    fn apply(&self, state: &mut PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        for character in &mut state.characters {
            character.reset_level();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::economy::EconomyEngine;
    use crate::state::{CharacterState, Consumables};

    fn state(level: u32, potions: u32) -> PlayerState {
        PlayerState {
            consumables: Consumables::new(0, potions),
            characters: vec![CharacterState::at_level(CharacterId(1), level)],
            ..PlayerState::default()
        }
    }

    #[test]
    fn level_up_fails_without_enough_potions() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);
        let before = state(1, 5);

        let error = engine
            .spend_level_up_potions(CharacterId(1), &before)
            .expect_err("not enough potions");

        assert_eq!(
            error.error,
            LevelUpError::InsufficientPotions {
                required: 10,
                available: 5
            }
        );
        assert_eq!(before.character(CharacterId(1)).map(CharacterState::level), Some(1));
        assert_eq!(before.consumables.level_up_potions, 5);
    }

    #[test]
    fn level_up_spends_cost_and_adds_one_level() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);

        let committed = engine
            .spend_level_up_potions(CharacterId(1), &state(1, 20))
            .expect("level up");

        assert_eq!(committed.state.consumables.level_up_potions, 10);
        assert_eq!(
            committed.state.character(CharacterId(1)).map(CharacterState::level),
            Some(2)
        );
        assert_eq!(
            committed.outcome,
            LevelUpReceipt {
                character: CharacterId(1),
                potions_spent: 10,
                new_level: 2
            }
        );
    }

    #[test]
    fn progression_factor_scales_cost() {
        let config = GameConfig::with_progression_factor(3);
        let engine = EconomyEngine::new(Default::default(), &config);

        let committed = engine
            .spend_level_up_potions(CharacterId(1), &state(4, 12))
            .expect("level up");
        assert_eq!(committed.state.consumables.level_up_potions, 0);
    }

    #[test]
    fn unknown_character_is_rejected() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);

        let error = engine
            .spend_level_up_potions(CharacterId(8), &state(1, 100))
            .expect_err("unknown");
        assert_eq!(error.error, LevelUpError::CharacterNotFound(CharacterId(8)));
    }

    #[test]
    fn reset_levels_zeroes_roster() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);

        let committed = engine.reset_levels(&state(9, 0)).expect("reset");
        assert!(committed.state.characters.iter().all(|c| c.level() == 0));
    }
}
