//! Phase bookkeeping for transaction failures.

use core::fmt;

use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transaction pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TransactionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransactionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionPhase::PreValidate => "pre_validate",
            TransactionPhase::Apply => "apply",
            TransactionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transaction phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionPhaseError<E> {
    pub phase: TransactionPhase,
    pub error: E,
}

impl<E> TransactionPhaseError<E> {
    pub fn new(phase: TransactionPhase, error: E) -> Self {
        Self { phase, error }
    }

    pub fn into_inner(self) -> E {
        self.error
    }
}

impl<E: fmt::Display> fmt::Display for TransactionPhaseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for TransactionPhaseError<E> {}

impl<E: GameError> GameError for TransactionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}
