//! Home-screen content: levels and the chat script.
use std::collections::BTreeMap;

use menu_core::{ChatLine, ChatOracle, LevelDefinition, LevelId, LevelOracle};

#[derive(Debug, Default)]
pub struct LevelOracleImpl {
    levels: BTreeMap<LevelId, LevelDefinition>,
}

impl LevelOracleImpl {
    pub fn new(levels: impl IntoIterator<Item = LevelDefinition>) -> Self {
        Self {
            levels: levels.into_iter().map(|level| (level.id, level)).collect(),
        }
    }
}

impl LevelOracle for LevelOracleImpl {
    fn level(&self, id: LevelId) -> Option<LevelDefinition> {
        self.levels.get(&id).cloned()
    }

    fn all_levels(&self) -> Vec<LevelDefinition> {
        self.levels.values().cloned().collect()
    }
}

/// Chat script kept in display order.
#[derive(Debug, Default)]
pub struct ChatOracleImpl {
    lines: Vec<ChatLine>,
}

impl ChatOracleImpl {
    pub fn new(lines: Vec<ChatLine>) -> Self {
        Self { lines }
    }
}

impl ChatOracle for ChatOracleImpl {
    fn chat_lines(&self) -> Vec<ChatLine> {
        self.lines.clone()
    }
}
