//! Content factory for building catalog data from a data directory.

use std::path::{Path, PathBuf};

use crate::loaders::{
    CatalogData, CharacterLoader, ChatLoader, ConfigLoader, EquipmentLoader, LevelLoader,
    LoadResult, MailLoader, ShopLoader,
};

/// Content factory that loads all menu content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── shop_items.ron
/// ├── equipment.ron
/// ├── characters.ron
/// ├── mail.ron
/// ├── levels.ron
/// └── chat.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<menu_core::GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_shop_items(&self) -> LoadResult<Vec<menu_core::ShopItemDefinition>> {
        ShopLoader::load(&self.data_dir.join("shop_items.ron"))
    }

    pub fn load_equipment(&self) -> LoadResult<Vec<menu_core::EquipmentDefinition>> {
        EquipmentLoader::load(&self.data_dir.join("equipment.ron"))
    }

    pub fn load_characters(&self) -> LoadResult<Vec<menu_core::CharacterDefinition>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    pub fn load_mail(&self) -> LoadResult<Vec<menu_core::MailTemplate>> {
        MailLoader::load(&self.data_dir.join("mail.ron"))
    }

    pub fn load_levels(&self) -> LoadResult<Vec<menu_core::LevelDefinition>> {
        LevelLoader::load(&self.data_dir.join("levels.ron"))
    }

    pub fn load_chat(&self) -> LoadResult<Vec<menu_core::ChatLine>> {
        ChatLoader::load(&self.data_dir.join("chat.ron"))
    }

    /// Load every catalog table. Fails on the first unreadable file.
    pub fn load_catalog(&self) -> LoadResult<CatalogData> {
        let data = CatalogData {
            shop_items: self.load_shop_items()?,
            equipment: self.load_equipment()?,
            characters: self.load_characters()?,
            mail: self.load_mail()?,
            levels: self.load_levels()?,
            chat: self.load_chat()?,
        };
        data.dangling_equipment();
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            shop_items = data.shop_items.len(),
            equipment = data.equipment.len(),
            characters = data.characters.len(),
            "catalog loaded"
        );
        Ok(data)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_directory_written_from_builtin_sources() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in crate::builtin::SOURCES {
            std::fs::write(dir.path().join(name), content).unwrap();
        }

        let factory = ContentFactory::new(dir.path());
        let loaded = factory.load_catalog().unwrap();

        assert_eq!(loaded, crate::builtin::catalog().unwrap());
        assert_eq!(factory.load_config().unwrap(), crate::builtin::config().unwrap());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path())
            .load_shop_items()
            .unwrap_err();
        assert!(error.to_string().contains("shop_items.ron"));
    }
}
