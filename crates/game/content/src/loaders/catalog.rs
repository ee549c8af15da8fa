//! The full set of catalog definitions loaded from one source.

use std::collections::BTreeSet;

use menu_core::{
    CharacterDefinition, ChatLine, EquipmentDefinition, EquipmentId, LevelDefinition,
    MailTemplate, Reward, ShopItemDefinition,
};

/// Every catalog table, ready to be handed to runtime oracles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogData {
    pub shop_items: Vec<ShopItemDefinition>,
    pub equipment: Vec<EquipmentDefinition>,
    pub characters: Vec<CharacterDefinition>,
    pub mail: Vec<MailTemplate>,
    pub levels: Vec<LevelDefinition>,
    pub chat: Vec<ChatLine>,
}

impl CatalogData {
    /// Lists references to equipment ids that have no definition.
    ///
    /// Dangling references are not fatal: the affected datum is skipped at
    /// use. Each one is logged as a warning.
    pub fn dangling_equipment(&self) -> Vec<EquipmentId> {
        let known: BTreeSet<EquipmentId> = self.equipment.iter().map(|piece| piece.id).collect();

        let from_shop = self.shop_items.iter().map(|item| item.content);
        let from_mail = self.mail.iter().filter_map(|message| message.reward);
        let rewarded = from_shop.chain(from_mail).filter_map(|reward| match reward {
            Reward::Equipment(id) => Some(id),
            _ => None,
        });
        let default_gear = self
            .characters
            .iter()
            .flat_map(|character| character.default_gear.iter().copied());

        let dangling: BTreeSet<EquipmentId> = rewarded
            .chain(default_gear)
            .filter(|id| !known.contains(id))
            .collect();

        for id in &dangling {
            tracing::warn!(equipment = %id, "catalog references undefined equipment");
        }
        dangling.into_iter().collect()
    }
}
