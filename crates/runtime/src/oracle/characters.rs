//! [`menu_core::CharacterOracle`] backed by an ordered map.
use std::collections::BTreeMap;

use menu_core::{CharacterDefinition, CharacterId, CharacterOracle};

#[derive(Debug, Default)]
pub struct CharacterOracleImpl {
    definitions: BTreeMap<CharacterId, CharacterDefinition>,
}

impl CharacterOracleImpl {
    pub fn new(definitions: impl IntoIterator<Item = CharacterDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }
}

impl CharacterOracle for CharacterOracleImpl {
    fn character(&self, id: CharacterId) -> Option<CharacterDefinition> {
        self.definitions.get(&id).cloned()
    }

    fn all_characters(&self) -> Vec<CharacterDefinition> {
        self.definitions.values().cloned().collect()
    }
}
