//! Mailbox flag transactions. Claiming lives in `reward`.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{InvariantViolation, MailFlags, MailState, MessageId, PlayerState};

use super::transaction::{EconomyEnv, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MailError {
    #[error("message {0} is not in the mailbox")]
    MessageNotFound(MessageId),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for MailError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MessageNotFound(_) => ErrorSeverity::Validation,
            Self::Invariant(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MessageNotFound(_) => "MAIL_MESSAGE_NOT_FOUND",
            Self::Invariant(error) => error.error_code(),
        }
    }
}

fn update_flags(
    state: &mut PlayerState,
    message: MessageId,
    update: impl FnOnce(&mut MailFlags),
) -> Result<MailState, MailError> {
    let record = state
        .message_mut(message)
        .ok_or(MailError::MessageNotFound(message))?;
    update(&mut record.flags);
    Ok(*record)
}

macro_rules! mail_transaction {
    ($(#[$meta:meta])* $name:ident, |$flags:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            pub message: MessageId,
        }

        impl $name {
            pub fn new(message: MessageId) -> Self {
                Self { message }
            }
        }

        impl Transaction for $name {
            type Output = MailState;
            type Error = MailError;

            fn apply(
                &self,
                state: &mut PlayerState,
                _env: &EconomyEnv<'_>,
            ) -> Result<Self::Output, Self::Error> {
                update_flags(state, self.message, |$flags| $body)
            }
        }
    };
}

mail_transaction!(
    /// Marks a message as read. Reading an already-read message is a no-op.
    MarkRead,
    |flags| flags.insert(MailFlags::READ)
);
mail_transaction!(
    /// Moves a message to the deleted folder.
    DeleteMessage,
    |flags| flags.insert(MailFlags::DELETED)
);
mail_transaction!(
    /// Restores a message from the deleted folder.
    UndeleteMessage,
    |flags| flags.remove(MailFlags::DELETED)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::economy::EconomyEngine;

    fn inbox() -> PlayerState {
        PlayerState {
            mailbox: vec![MailState::new(MessageId(1))],
            ..PlayerState::default()
        }
    }

    #[test]
    fn delete_and_undelete_toggle_only_the_deleted_flag() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);

        let read = engine.mark_read(MessageId(1), &inbox()).expect("read");
        let deleted = engine
            .delete_message(MessageId(1), &read.state)
            .expect("delete");
        assert!(deleted.outcome.is_deleted() && deleted.outcome.is_read());

        let restored = engine
            .undelete_message(MessageId(1), &deleted.state)
            .expect("undelete");
        assert!(!restored.outcome.is_deleted());
        assert!(restored.outcome.is_read());
    }

    #[test]
    fn unknown_message_is_rejected() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);

        let error = engine
            .mark_read(MessageId(3), &inbox())
            .expect_err("missing");
        assert_eq!(error.error, MailError::MessageNotFound(MessageId(3)));
    }
}
