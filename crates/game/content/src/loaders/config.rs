//! Game configuration loader.

use std::path::Path;

use menu_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.progression_factor == 0 {
            tracing::warn!("progression_factor 0 is clamped to 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("unequip_duplicate_gear_type = true\n").unwrap();
        assert!(config.unequip_duplicate_gear_type);
        assert_eq!(
            config.progression_factor,
            GameConfig::DEFAULT_PROGRESSION_FACTOR
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ConfigLoader::parse("progression_factor = \"ten\"").is_err());
    }
}
