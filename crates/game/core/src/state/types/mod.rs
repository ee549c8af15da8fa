//! Plain data records that make up [`crate::state::PlayerState`].
mod character;
mod common;
mod inventory;
mod mail;
mod settings;
mod wallet;

pub use character::{CharacterState, GearSlots};
pub use common::{CharacterId, EquipmentId, LevelId, MessageId, ShopItemId};
pub use inventory::InventoryState;
pub use mail::{MailFlags, MailState};
pub use settings::Settings;
pub use wallet::{ConsumableKind, Consumables, Currencies, CurrencyKind};
