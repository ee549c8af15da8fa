use crate::catalog::Catalog;
use crate::config::GameConfig;
use crate::state::{InvariantViolation, PlayerState};

use super::errors::{TransactionPhase, TransactionPhaseError};

/// Read-only facts a transaction may consult: catalog data and tuning.
#[derive(Clone, Copy, Debug)]
pub struct EconomyEnv<'a> {
    pub catalog: Catalog<'a>,
    pub config: &'a GameConfig,
}

impl<'a> EconomyEnv<'a> {
    pub fn new(catalog: Catalog<'a>, config: &'a GameConfig) -> Self {
        Self { catalog, config }
    }
}

/// Defines how one atomic operation validates and mutates [`PlayerState`].
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. The default post-condition checks
/// the aggregate invariants. Hooks must stay side-effect free apart from the
/// `state` handed to `apply`.
pub trait Transaction {
    type Output;
    type Error: From<InvariantViolation>;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the transaction. Implementations may assume `pre_validate`
    /// already succeeded.
    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), Self::Error> {
        state.check_invariants().map_err(Self::Error::from)
    }
}

/// Runs `transaction` through pre_validate, apply and post_validate.
///
/// `state` may be partially mutated when this returns an error; callers run
/// it on a scratch copy and discard that copy on failure.
pub(super) fn drive_transaction<T>(
    transaction: &T,
    state: &mut PlayerState,
    env: &EconomyEnv<'_>,
) -> Result<T::Output, TransactionPhaseError<T::Error>>
where
    T: Transaction + ?Sized,
{
    transaction
        .pre_validate(state, env)
        .map_err(|error| TransactionPhaseError::new(TransactionPhase::PreValidate, error))?;

    let output = transaction
        .apply(state, env)
        .map_err(|error| TransactionPhaseError::new(TransactionPhase::Apply, error))?;

    transaction
        .post_validate(state, env)
        .map_err(|error| TransactionPhaseError::new(TransactionPhase::PostValidate, error))?;

    Ok(output)
}
