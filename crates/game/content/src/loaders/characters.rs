//! Character roster loader.

use std::path::Path;

use menu_core::CharacterDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, parse_ron, read_file};

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterDefinition>,
}

/// Loader for character definitions from RON files.
///
/// Definitions without skills load fine; the stats panel skips that section
/// and a warning is logged here once.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterDefinition>> {
        let catalog: CharacterCatalog = parse_ron(content, "character catalog")?;
        ensure_unique_ids(&catalog.characters, |character| character.id, "character")?;

        for character in catalog.characters.iter().filter(|c| c.skills.is_empty()) {
            tracing::warn!(
                character = %character.id,
                name = %character.name,
                "character has no skill definitions"
            );
        }

        Ok(catalog.characters)
    }
}
