//! Runtime configuration and environment loading.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use menu_core::GameConfig;

/// Runtime configuration shared across services.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Location of the persisted player-state document.
    pub save_path: PathBuf,
    /// Read the save file on startup. When false a new game always starts
    /// and saves go to memory only.
    pub load_from_disk: bool,
    /// Overlays hide the modal screen underneath instead of drawing on top.
    pub full_screen_overlays: bool,
    pub sequences: SequenceConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            save_path: default_save_path(),
            load_from_disk: true,
            full_screen_overlays: false,
            sequences: SequenceConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub const SAVE_FILE_NAME: &'static str = "savegame.json";

    /// Construct configuration from process environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    ///
    /// Environment variables:
    /// - `MENU_SAVE_PATH` - Save document path (default: platform data dir)
    /// - `MENU_LOAD_FROM_DISK` - Load and save on disk (default: true)
    /// - `MENU_FULL_SCREEN_OVERLAYS` - Overlays hide the screen below (default: false)
    /// - `MENU_PROGRESSION_FACTOR` - Level-up potions per level (default: 10)
    /// - `MENU_UNEQUIP_DUPLICATE_GEAR` - One piece per equipment type (default: false)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("MENU_SAVE_PATH") {
            config.save_path = path;
        }
        if let Some(enabled) = read_env_bool("MENU_LOAD_FROM_DISK") {
            config.load_from_disk = enabled;
        }
        if let Some(enabled) = read_env_bool("MENU_FULL_SCREEN_OVERLAYS") {
            config.full_screen_overlays = enabled;
        }
        if let Some(factor) = read_env::<u32>("MENU_PROGRESSION_FACTOR") {
            config.game.progression_factor = factor.max(1);
        }
        if let Some(enabled) = read_env_bool("MENU_UNEQUIP_DUPLICATE_GEAR") {
            config.game.unequip_duplicate_gear_type = enabled;
        }

        config
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.load_from_disk = false;
        self
    }
}

/// Timing of cooperative UI sequences.
#[derive(Clone, Debug)]
pub struct SequenceConfig {
    /// Delay between typed characters of a chat line.
    pub chat_key_delay: Duration,
    /// Pause after a chat line is fully typed.
    pub chat_line_delay: Duration,
    /// Restart the chat script after the last line.
    pub chat_loop: bool,
    /// Delay between animated counter steps.
    pub counter_step_delay: Duration,
    /// Number of intermediate values a counter animation shows.
    pub counter_steps: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            chat_key_delay: Duration::from_millis(20),
            chat_line_delay: Duration::from_millis(1000),
            chat_loop: true,
            counter_step_delay: Duration::from_millis(16),
            counter_steps: 30,
        }
    }
}

/// Platform data directory for the save file.
///
/// - macOS: `~/Library/Application Support/menu`
/// - Linux: `~/.local/share/menu` (or `$XDG_DATA_HOME/menu`)
/// - Windows: `%APPDATA%\menu`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "menu")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

pub fn default_save_path() -> PathBuf {
    data_dir().join(RuntimeConfig::SAVE_FILE_NAME)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_save_file_name() {
        let config = RuntimeConfig::default();
        assert!(config.save_path.ends_with(RuntimeConfig::SAVE_FILE_NAME));
        assert_eq!(config.sequences.chat_key_delay, Duration::from_millis(20));
        assert_eq!(config.sequences.chat_line_delay, Duration::from_millis(1000));
    }

    #[test]
    fn in_memory_disables_disk() {
        let config = RuntimeConfig::default().in_memory().with_save_path("/tmp/x.json");
        assert!(!config.load_from_disk);
        assert_eq!(config.save_path, PathBuf::from("/tmp/x.json"));
    }
}
