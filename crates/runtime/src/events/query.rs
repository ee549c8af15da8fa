//! Single-provider request/response channels.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use menu_core::{LevelMeter, PlayerState};

/// Errors raised by query channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    #[error("no provider registered for query '{0}'")]
    Unavailable(&'static str),

    #[error("query '{0}' already has a provider")]
    ProviderAlreadyRegistered(&'static str),
}

type Provider<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A query topic: any number of callers, at most one provider.
pub struct QueryChannel<T> {
    name: &'static str,
    provider: RwLock<Option<Provider<T>>>,
}

impl<T> QueryChannel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            provider: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Installs the provider. A second registration is rejected and the
    /// first provider stays in place.
    pub fn register<F>(&self, provider: F) -> Result<(), BusError>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut slot = self.provider.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(BusError::ProviderAlreadyRegistered(self.name));
        }
        *slot = Some(Arc::new(provider));
        Ok(())
    }

    /// Returns false if no provider was registered.
    pub fn unregister(&self) -> bool {
        self.provider
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    pub fn has_provider(&self) -> bool {
        self.provider
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Resolves to the provider's current value.
    pub fn query(&self) -> Result<T, BusError> {
        let provider = self
            .provider
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(BusError::Unavailable(self.name))?;
        Ok(provider())
    }
}

impl<T> fmt::Debug for QueryChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryChannel")
            .field("name", &self.name)
            .field("has_provider", &self.has_provider())
            .finish()
    }
}

/// Query channels carried by the event bus.
#[derive(Debug)]
pub struct Queries {
    /// Home-screen level meter.
    pub level_meter: QueryChannel<LevelMeter>,
    /// Read-only snapshot of the player state.
    pub player_state: QueryChannel<PlayerState>,
}

impl Default for Queries {
    fn default() -> Self {
        Self {
            level_meter: QueryChannel::new("level_meter"),
            player_state: QueryChannel::new("player_state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_without_provider_is_unavailable() {
        let channel: QueryChannel<u32> = QueryChannel::new("answer");
        assert_eq!(channel.query(), Err(BusError::Unavailable("answer")));
    }

    #[test]
    fn second_provider_is_rejected() {
        let channel = QueryChannel::new("answer");
        channel.register(|| 42).unwrap();

        assert_eq!(
            channel.register(|| 7),
            Err(BusError::ProviderAlreadyRegistered("answer"))
        );
        assert_eq!(channel.query(), Ok(42));
    }

    #[test]
    fn unregister_frees_the_slot() {
        let channel = QueryChannel::new("answer");
        channel.register(|| 1).unwrap();
        assert!(channel.unregister());
        assert!(!channel.unregister());
        channel.register(|| 2).unwrap();
        assert_eq!(channel.query(), Ok(2));
    }
}
