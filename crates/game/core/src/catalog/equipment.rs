use crate::state::types::EquipmentId;

pub trait EquipmentOracle: Send + Sync {
    fn equipment(&self, id: EquipmentId) -> Option<EquipmentDefinition>;

    /// Every definition, ordered by id.
    fn all_equipment(&self) -> Vec<EquipmentDefinition>;
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentType {
    Weapon,
    Shield,
    Helmet,
    Boots,
    Gloves,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    Common,
    Rare,
    Special,
}

/// Flat stat bonuses granted while worn. Reserved: the power score does not
/// count them yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonus {
    pub attack: u32,
    pub defense: u32,
    pub life: u32,
    pub crit: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub name: String,
    pub equipment_type: EquipmentType,
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: StatBonus,
}

impl EquipmentDefinition {
    pub fn new(
        id: EquipmentId,
        name: impl Into<String>,
        equipment_type: EquipmentType,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            equipment_type,
            rarity,
            bonus: StatBonus::default(),
        }
    }
}

/// Inventory overlay filter; `None` on either axis means "all".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GearFilter {
    pub rarity: Option<Rarity>,
    pub equipment_type: Option<EquipmentType>,
}

impl GearFilter {
    pub const ALL: Self = Self {
        rarity: None,
        equipment_type: None,
    };

    pub fn matches(&self, definition: &EquipmentDefinition) -> bool {
        self.rarity.is_none_or(|rarity| rarity == definition.rarity)
            && self
                .equipment_type
                .is_none_or(|kind| kind == definition.equipment_type)
    }
}
