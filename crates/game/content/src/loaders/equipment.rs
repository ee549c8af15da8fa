//! Equipment catalog loader.

use std::path::Path;

use menu_core::EquipmentDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, parse_ron, read_file};

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub equipment: Vec<EquipmentDefinition>,
}

/// Loader for equipment from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EquipmentDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EquipmentDefinition>> {
        let catalog: EquipmentCatalog = parse_ron(content, "equipment catalog")?;
        ensure_unique_ids(&catalog.equipment, |piece| piece.id, "equipment")?;
        Ok(catalog.equipment)
    }
}
