use crate::catalog::{OracleError, Reward};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InvariantViolation, MailFlags, MessageId, PlayerState};

use super::transaction::{EconomyEnv, Transaction};

/// Claims the gift attached to a mail message.
///
/// Claiming is one-way: the `CLAIMED` flag is set in the same transaction
/// that credits the reward, and a second claim fails with
/// [`ClaimError::AlreadyClaimed`] without touching the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimReward {
    pub message: MessageId,
}

impl ClaimReward {
    pub fn new(message: MessageId) -> Self {
        Self { message }
    }

    fn reward(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<Reward, ClaimError> {
        let record = state
            .message(self.message)
            .ok_or(ClaimError::MessageNotFound(self.message))?;
        if record.is_claimed() {
            return Err(ClaimError::AlreadyClaimed(self.message));
        }
        if record.is_deleted() {
            return Err(ClaimError::MessageDeleted(self.message));
        }

        env.catalog
            .mail()?
            .template(self.message)
            .ok_or(ClaimError::TemplateMissing(self.message))?
            .reward
            .ok_or(ClaimError::NoReward(self.message))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimReceipt {
    pub message: MessageId,
    pub reward: Reward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimError {
    #[error("message {0} is not in the mailbox")]
    MessageNotFound(MessageId),

    #[error("reward of message {0} was already claimed")]
    AlreadyClaimed(MessageId),

    #[error("message {0} is deleted")]
    MessageDeleted(MessageId),

    #[error("message {0} carries no reward")]
    NoReward(MessageId),

    #[error("message {0} has no catalog template")]
    TemplateMissing(MessageId),

    #[error(transparent)]
    Catalog(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for ClaimError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MessageNotFound(_)
            | Self::AlreadyClaimed(_)
            | Self::MessageDeleted(_)
            | Self::NoReward(_) => ErrorSeverity::Validation,
            Self::TemplateMissing(_) => ErrorSeverity::DataIntegrity,
            Self::Catalog(error) => error.severity(),
            Self::Invariant(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MessageNotFound(_) => "CLAIM_MESSAGE_NOT_FOUND",
            Self::AlreadyClaimed(_) => "CLAIM_ALREADY_CLAIMED",
            Self::MessageDeleted(_) => "CLAIM_MESSAGE_DELETED",
            Self::NoReward(_) => "CLAIM_NO_REWARD",
            Self::TemplateMissing(_) => "CLAIM_TEMPLATE_MISSING",
            Self::Catalog(error) => error.error_code(),
            Self::Invariant(error) => error.error_code(),
        }
    }
}

impl Transaction for ClaimReward {
    type Output = ClaimReceipt;
    type Error = ClaimError;

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        self.reward(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        let reward = self.reward(state, env)?;
        // Equipment already owned still counts as claimed.
        super::credit(state, reward);

        let record = state
            .message_mut(self.message)
            .ok_or(ClaimError::MessageNotFound(self.message))?;
        record.flags.insert(MailFlags::CLAIMED | MailFlags::READ);

        Ok(ClaimReceipt {
            message: self.message,
            reward,
        })
    }

    fn post_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        state.check_invariants()?;
        match state.message(self.message) {
            Some(record) if record.is_claimed() => Ok(()),
            _ => Err(ClaimError::MessageNotFound(self.message)),
        }
    }
}

/// Zeroes every currency and consumable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetFunds;

impl Transaction for ResetFunds {
    type Output = ();
    type Error = InvariantViolation;

    fn apply(&self, state: &mut PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        state.currencies.clear();
        state.consumables.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::economy::EconomyEngine;
    use crate::economy::test_support::Fixture;
    use crate::state::{Consumables, Currencies, MailState};

    fn mailbox_state() -> PlayerState {
        PlayerState {
            currencies: Currencies::new(10, 0),
            mailbox: vec![MailState::new(MessageId(1)), MailState::new(MessageId(2))],
            ..PlayerState::default()
        }
    }

    #[test]
    fn claim_credits_once() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let once = engine
            .claim_reward(MessageId(1), &mailbox_state())
            .expect("first claim");
        assert_eq!(once.state.currencies.gold, 210);
        assert!(once.state.message(MessageId(1)).is_some_and(MailState::is_claimed));

        let twice = engine
            .claim_reward(MessageId(1), &once.state)
            .expect_err("second claim");
        assert_eq!(twice.error, ClaimError::AlreadyClaimed(MessageId(1)));
        assert_eq!(once.state.currencies.gold, 210);
    }

    #[test]
    fn message_without_reward_cannot_be_claimed() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);

        let error = engine
            .claim_reward(MessageId(2), &mailbox_state())
            .expect_err("no reward");
        assert_eq!(error.error, ClaimError::NoReward(MessageId(2)));
    }

    #[test]
    fn deleted_message_cannot_be_claimed() {
        let fixture = Fixture::new();
        let config = GameConfig::default();
        let engine = EconomyEngine::new(fixture.catalog(), &config);
        let mut state = mailbox_state();
        state.mailbox[0].flags.insert(MailFlags::DELETED);

        let error = engine
            .claim_reward(MessageId(1), &state)
            .expect_err("deleted");
        assert_eq!(error.error, ClaimError::MessageDeleted(MessageId(1)));
    }

    #[test]
    fn reset_funds_zeroes_balances() {
        let config = GameConfig::default();
        let engine = EconomyEngine::new(Default::default(), &config);
        let state = PlayerState {
            currencies: Currencies::new(500, 50),
            consumables: Consumables::new(6, 80),
            ..PlayerState::default()
        };

        let committed = engine.reset_funds(&state).expect("reset");
        assert_eq!(committed.state.currencies, Currencies::default());
        assert_eq!(committed.state.consumables, Consumables::default());
    }
}
