use crate::state::types::LevelId;

pub trait LevelOracle: Send + Sync {
    fn level(&self, id: LevelId) -> Option<LevelDefinition>;

    /// Every level, ordered by id.
    fn all_levels(&self) -> Vec<LevelDefinition>;
}

/// Gameplay level advertised on the home screen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub id: LevelId,
    pub number: u32,
    pub name: String,
    pub scene: String,
}

pub trait ChatOracle: Send + Sync {
    /// Home-screen chat script, in display order.
    fn chat_lines(&self) -> Vec<ChatLine>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatLine {
    pub speaker: String,
    pub message: String,
}

impl ChatLine {
    pub fn new(speaker: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            message: message.into(),
        }
    }
}
