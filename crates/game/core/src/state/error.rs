//! Aggregate invariant violations.

use crate::error::{ErrorSeverity, GameError};
use crate::state::types::{CharacterId, EquipmentId, MessageId};

/// A [`super::PlayerState`] invariant that failed to hold.
///
/// Raised by post-validation; a transaction that produces one is discarded
/// and the previous state kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("equipment {equipment} is worn in more than one slot")]
    EquipmentWornTwice { equipment: EquipmentId },

    #[error("equipment {equipment} is worn by {character} but not owned")]
    WornButNotOwned {
        equipment: EquipmentId,
        character: CharacterId,
    },

    #[error("character {0} appears more than once")]
    DuplicateCharacter(CharacterId),

    #[error("message {0} appears more than once in the mailbox")]
    DuplicateMessage(MessageId),
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EquipmentWornTwice { .. } => "EQUIPMENT_WORN_TWICE",
            Self::WornButNotOwned { .. } => "WORN_BUT_NOT_OWNED",
            Self::DuplicateCharacter(_) => "DUPLICATE_CHARACTER",
            Self::DuplicateMessage(_) => "DUPLICATE_MESSAGE",
        }
    }
}
