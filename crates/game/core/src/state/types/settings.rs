//! User preferences persisted alongside the economy.

/// Settings screen values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub username: String,
    /// Theme suffix, combined with the screen aspect ratio by the theme layer.
    pub theme: String,
    /// Percent, 0..=100.
    pub music_volume: u8,
    /// Percent, 0..=100.
    pub sfx_volume: u8,
    pub dropdown_selection: String,
    /// Frame-rate radio button index.
    pub button_selection: u8,
    /// Shows the fps counter.
    pub fps_counter_enabled: bool,
    pub toggled: bool,
}

impl Settings {
    pub const DEFAULT_USERNAME: &'static str = "GUEST_123456";
    pub const DEFAULT_THEME: &'static str = "Default";
    pub const DEFAULT_VOLUME: u8 = 80;

    /// Target frame rate for the selected radio button; `-1` means unlimited.
    pub fn target_frame_rate(&self) -> i32 {
        match self.button_selection {
            0 => -1,
            1 => 60,
            2 => 30,
            _ => 60,
        }
    }

    /// Volumes clamped into 0..=100.
    pub fn normalized(mut self) -> Self {
        self.music_volume = self.music_volume.min(100);
        self.sfx_volume = self.sfx_volume.min(100);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: Self::DEFAULT_USERNAME.to_string(),
            theme: Self::DEFAULT_THEME.to_string(),
            music_volume: Self::DEFAULT_VOLUME,
            sfx_volume: Self::DEFAULT_VOLUME,
            dropdown_selection: "Item1".to_string(),
            button_selection: 2,
            fps_counter_enabled: false,
            toggled: false,
        }
    }
}
