use crate::state::{InvariantViolation, PlayerState, Settings};

use super::transaction::{EconomyEnv, Transaction};

/// Replaces the settings block. Out-of-range values are normalized first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateSettings {
    pub settings: Settings,
}

impl UpdateSettings {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Transaction for UpdateSettings {
    /// The settings as stored.
    type Output = Settings;
    type Error = InvariantViolation;

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Output, Self::Error> {
        state.settings = self.settings.clone().normalized();
        Ok(state.settings.clone())
    }
}
