//! Shop listing loader.

use std::path::Path;

use menu_core::ShopItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, parse_ron, read_file};

/// Shop catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub items: Vec<ShopItemDefinition>,
}

/// Loader for shop listings from RON files.
pub struct ShopLoader;

impl ShopLoader {
    /// Load shop listings from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ShopItemDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ShopItemDefinition>> {
        let catalog: ShopCatalog = parse_ron(content, "shop catalog")?;
        ensure_unique_ids(&catalog.items, |item| item.id, "shop item")?;

        for item in &catalog.items {
            if item.discount > menu_core::economy::MAX_DISCOUNT {
                tracing::warn!(
                    item = %item.id,
                    discount = item.discount,
                    "discount above 100%, listing will be free"
                );
            }
        }

        Ok(catalog.items)
    }
}
