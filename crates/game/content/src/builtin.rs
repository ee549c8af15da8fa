//! Default catalog compiled into the binary.

use menu_core::GameConfig;

use crate::loaders::{
    CatalogData, CharacterLoader, ChatLoader, ConfigLoader, EquipmentLoader, LevelLoader,
    LoadResult, MailLoader, ShopLoader,
};

const CONFIG: &str = include_str!("../data/config.toml");
const SHOP_ITEMS: &str = include_str!("../data/shop_items.ron");
const EQUIPMENT: &str = include_str!("../data/equipment.ron");
const CHARACTERS: &str = include_str!("../data/characters.ron");
const MAIL: &str = include_str!("../data/mail.ron");
const LEVELS: &str = include_str!("../data/levels.ron");
const CHAT: &str = include_str!("../data/chat.ron");

/// `(file name, content)` of every built-in data file.
pub const SOURCES: [(&str, &str); 7] = [
    ("config.toml", CONFIG),
    ("shop_items.ron", SHOP_ITEMS),
    ("equipment.ron", EQUIPMENT),
    ("characters.ron", CHARACTERS),
    ("mail.ron", MAIL),
    ("levels.ron", LEVELS),
    ("chat.ron", CHAT),
];

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn catalog() -> LoadResult<CatalogData> {
    let data = CatalogData {
        shop_items: ShopLoader::parse(SHOP_ITEMS)?,
        equipment: EquipmentLoader::parse(EQUIPMENT)?,
        characters: CharacterLoader::parse(CHARACTERS)?,
        mail: MailLoader::parse(MAIL)?,
        levels: LevelLoader::parse(LEVELS)?,
        chat: ChatLoader::parse(CHAT)?,
    };
    data.dangling_equipment();
    Ok(data)
}

#[cfg(test)]
mod tests {
    use menu_core::{CurrencyKind, Reward, ShopTab};

    use super::*;

    #[test]
    fn builtin_catalog_parses_and_is_consistent() {
        let data = catalog().unwrap();
        assert!(data.dangling_equipment().is_empty());
        assert!(data.characters.len() >= GameConfig::DEFAULT_STARTING_CHARACTERS);
        assert!(data.equipment.len() >= GameConfig::DEFAULT_STARTING_EQUIPMENT);
        assert!(!data.chat.is_empty());
    }

    #[test]
    fn builtin_shop_covers_every_tab() {
        let data = catalog().unwrap();
        for tab in [ShopTab::Gold, ShopTab::Gems, ShopTab::Potions] {
            assert!(data.shop_items.iter().any(|item| item.tab() == tab), "{tab}");
        }
        assert!(
            data.shop_items
                .iter()
                .any(|item| item.currency == CurrencyKind::Usd)
        );
    }

    #[test]
    fn builtin_mail_has_claimable_gift() {
        let data = catalog().unwrap();
        assert!(
            data.mail
                .iter()
                .any(|message| matches!(message.reward, Some(Reward::Gold(_) | Reward::Gems(_))))
        );
    }

    #[test]
    fn builtin_config_is_default() {
        assert_eq!(config().unwrap(), GameConfig::default());
    }
}
