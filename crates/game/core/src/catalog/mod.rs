//! Traits describing read-only catalog data.
//!
//! Oracles expose shop listings, equipment, characters, mail templates,
//! levels and the home chat script. The [`Catalog`] aggregate bundles them so
//! the engines can look definitions up without coupling to the concrete data
//! source. Nothing in this crate mutates catalog data.
mod characters;
mod equipment;
mod error;
mod levels;
mod mail;
mod reward;
mod shop;

pub use characters::{BaseStats, CharacterDefinition, CharacterOracle};
pub use equipment::{
    EquipmentDefinition, EquipmentOracle, EquipmentType, GearFilter, Rarity, StatBonus,
};
pub use error::OracleError;
pub use levels::{ChatLine, ChatOracle, LevelDefinition, LevelOracle};
pub use mail::{MailOracle, MailTemplate};
pub use reward::Reward;
pub use shop::{ShopItemDefinition, ShopOracle, ShopTab, shop_listing};

/// Aggregates the read-only oracles required by the transactions.
#[derive(Clone, Copy, Default)]
pub struct Catalog<'a> {
    shop: Option<&'a dyn ShopOracle>,
    equipment: Option<&'a dyn EquipmentOracle>,
    characters: Option<&'a dyn CharacterOracle>,
    mail: Option<&'a dyn MailOracle>,
    levels: Option<&'a dyn LevelOracle>,
    chat: Option<&'a dyn ChatOracle>,
}

impl<'a> Catalog<'a> {
    pub fn with_all(
        shop: &'a dyn ShopOracle,
        equipment: &'a dyn EquipmentOracle,
        characters: &'a dyn CharacterOracle,
        mail: &'a dyn MailOracle,
        levels: &'a dyn LevelOracle,
        chat: &'a dyn ChatOracle,
    ) -> Self {
        Self {
            shop: Some(shop),
            equipment: Some(equipment),
            characters: Some(characters),
            mail: Some(mail),
            levels: Some(levels),
            chat: Some(chat),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_shop(mut self, shop: &'a dyn ShopOracle) -> Self {
        self.shop = Some(shop);
        self
    }

    pub fn with_equipment(mut self, equipment: &'a dyn EquipmentOracle) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_characters(mut self, characters: &'a dyn CharacterOracle) -> Self {
        self.characters = Some(characters);
        self
    }

    pub fn with_mail(mut self, mail: &'a dyn MailOracle) -> Self {
        self.mail = Some(mail);
        self
    }

    /// Returns the ShopOracle, or an error if not available.
    pub fn shop(&self) -> Result<&'a dyn ShopOracle, OracleError> {
        self.shop.ok_or(OracleError::ShopNotAvailable)
    }

    /// Returns the EquipmentOracle, or an error if not available.
    pub fn equipment(&self) -> Result<&'a dyn EquipmentOracle, OracleError> {
        self.equipment.ok_or(OracleError::EquipmentNotAvailable)
    }

    /// Returns the CharacterOracle, or an error if not available.
    pub fn characters(&self) -> Result<&'a dyn CharacterOracle, OracleError> {
        self.characters.ok_or(OracleError::CharactersNotAvailable)
    }

    /// Returns the MailOracle, or an error if not available.
    pub fn mail(&self) -> Result<&'a dyn MailOracle, OracleError> {
        self.mail.ok_or(OracleError::MailNotAvailable)
    }

    /// Returns the LevelOracle, or an error if not available.
    pub fn levels(&self) -> Result<&'a dyn LevelOracle, OracleError> {
        self.levels.ok_or(OracleError::LevelsNotAvailable)
    }

    /// Returns the ChatOracle, or an error if not available.
    pub fn chat(&self) -> Result<&'a dyn ChatOracle, OracleError> {
        self.chat.ok_or(OracleError::ChatNotAvailable)
    }
}

impl core::fmt::Debug for Catalog<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalog")
            .field("shop", &self.shop.is_some())
            .field("equipment", &self.equipment.is_some())
            .field("characters", &self.characters.is_some())
            .field("mail", &self.mail.is_some())
            .field("levels", &self.levels.is_some())
            .field("chat", &self.chat.is_some())
            .finish()
    }
}
