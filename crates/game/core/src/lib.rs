//! Pure rules of the game menu front end.
//!
//! `menu-core` defines the player-state aggregate, the read-only catalog
//! interfaces, and the transactional economy and progression rules. It has no
//! I/O: the runtime owns persistence, event delivery and scheduling. Every
//! mutation of [`PlayerState`] flows through [`economy::EconomyEngine`].
pub mod catalog;
pub mod config;
pub mod economy;
pub mod error;
pub mod progression;
pub mod state;

pub use catalog::{
    BaseStats, Catalog, CharacterDefinition, CharacterOracle, ChatLine, ChatOracle,
    EquipmentDefinition, EquipmentOracle, EquipmentType, GearFilter, LevelDefinition, LevelOracle,
    MailOracle, MailTemplate, OracleError, Rarity, Reward, ShopItemDefinition, ShopOracle,
    ShopTab, StatBonus, shop_listing,
};
pub use config::GameConfig;
pub use economy::{
    AutoEquip, ClaimError, ClaimReceipt, ClaimReward, Committed, DeleteMessage, EconomyEngine,
    EconomyEnv, EquipGear, GearError, GearReceipt, LevelUp, LevelUpError, LevelUpReceipt,
    MailError, MarkRead, Price, Purchase, PurchaseError, PurchaseReceipt, ResetFunds, ResetLevels,
    Transaction, TransactionPhase, TransactionPhaseError, TransactionResult, UndeleteMessage,
    UnequipAll, UnequipSlot, UpdateSettings, discounted_price,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{
    LevelMeter, Rank, aggregate_progression, can_level_up, increment_level,
    potions_required_for_next_level, power_score,
};
pub use state::{
    CharacterId, CharacterState, ConsumableKind, Consumables, Currencies, CurrencyKind,
    EquipmentId, GearSlots, InvariantViolation, InventoryState, LevelId, MailEntry, MailFlags,
    MailState, MessageId, PlayerState, Settings, ShopItemId,
};
