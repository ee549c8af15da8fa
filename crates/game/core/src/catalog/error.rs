//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a [`super::Catalog`] is missing a data source.
///
/// A missing *definition* is not an error at this level: oracles return
/// `None` and callers decide whether that is a validation failure or a
/// data-integrity warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ShopOracle not available")]
    ShopNotAvailable,

    #[error("EquipmentOracle not available")]
    EquipmentNotAvailable,

    #[error("CharacterOracle not available")]
    CharactersNotAvailable,

    #[error("MailOracle not available")]
    MailNotAvailable,

    #[error("LevelOracle not available")]
    LevelsNotAvailable,

    #[error("ChatOracle not available")]
    ChatNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::DataIntegrity
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ShopNotAvailable => "SHOP_NOT_AVAILABLE",
            Self::EquipmentNotAvailable => "EQUIPMENT_NOT_AVAILABLE",
            Self::CharactersNotAvailable => "CHARACTERS_NOT_AVAILABLE",
            Self::MailNotAvailable => "MAIL_NOT_AVAILABLE",
            Self::LevelsNotAvailable => "LEVELS_NOT_AVAILABLE",
            Self::ChatNotAvailable => "CHAT_NOT_AVAILABLE",
        }
    }
}
