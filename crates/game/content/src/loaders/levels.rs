//! Level list and home chat script loaders.

use std::path::Path;

use menu_core::{ChatLine, LevelDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelDefinition>,
}

pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<LevelDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<LevelDefinition>> {
        let catalog: LevelCatalog = parse_ron(content, "level catalog")?;
        ensure_unique_ids(&catalog.levels, |level| level.id, "level")?;
        Ok(catalog.levels)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatScript {
    pub lines: Vec<ChatLine>,
}

/// Loader for the home-screen chat script. Line order is display order.
pub struct ChatLoader;

impl ChatLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ChatLine>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ChatLine>> {
        let script: ChatScript = parse_ron(content, "chat script")?;
        Ok(script.lines)
    }
}
