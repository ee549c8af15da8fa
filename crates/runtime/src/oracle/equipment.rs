//! [`menu_core::EquipmentOracle`] backed by an ordered map.
use std::collections::BTreeMap;

use menu_core::{EquipmentDefinition, EquipmentId, EquipmentOracle};

#[derive(Debug, Default)]
pub struct EquipmentOracleImpl {
    definitions: BTreeMap<EquipmentId, EquipmentDefinition>,
}

impl EquipmentOracleImpl {
    pub fn new(definitions: impl IntoIterator<Item = EquipmentDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }

    pub fn add_definition(&mut self, def: EquipmentDefinition) {
        self.definitions.insert(def.id, def);
    }
}

impl EquipmentOracle for EquipmentOracleImpl {
    fn equipment(&self, id: EquipmentId) -> Option<EquipmentDefinition> {
        self.definitions.get(&id).cloned()
    }

    fn all_equipment(&self) -> Vec<EquipmentDefinition> {
        self.definitions.values().cloned().collect()
    }
}
