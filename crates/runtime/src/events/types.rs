//! Event payloads, one enum per topic.
//!
//! Each topic carries both the requests screens publish and the results
//! services publish back. Handlers match the variants they care about and
//! ignore the rest.

use serde::{Deserialize, Serialize};

use menu_core::{
    CharacterId, ClaimError, ClaimReceipt, CurrencyKind, EquipmentId, GearError, GearReceipt,
    InvariantViolation, LevelMeter, LevelUpError, LevelUpReceipt, MailError, MessageId,
    PurchaseError, PurchaseReceipt, Settings, ShopItemId, TransactionPhase,
};

use crate::view::{OverlayId, ScreenId};

/// Navigation requests and the visibility changes they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    ShowScreenRequested(ScreenId),
    OpenOverlayRequested(OverlayId),
    CloseOverlayRequested(OverlayId),

    ScreenShown(ScreenId),
    ScreenHidden(ScreenId),
    OverlayShown(OverlayId),
    OverlayHidden(OverlayId),
    /// The modal screen the player is looking at changed.
    CurrentViewChanged(ScreenId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopEvent {
    PurchaseRequested { item: ShopItemId },
    PurchaseSucceeded(PurchaseReceipt),
    PurchaseFailed { item: ShopItemId, reason: PurchaseFailure },
}

/// Why a purchase did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseFailure {
    Rejected {
        phase: TransactionPhase,
        error: PurchaseError,
    },
    PaymentDeclined {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailEvent {
    ClaimRequested { message: MessageId },
    MarkReadRequested { message: MessageId },
    DeleteRequested { message: MessageId },
    UndeleteRequested { message: MessageId },

    RewardClaimed(ClaimReceipt),
    ClaimFailed {
        message: MessageId,
        phase: TransactionPhase,
        error: ClaimError,
    },
    ActionFailed {
        message: MessageId,
        error: MailError,
    },
    /// Folder counts after any mailbox change.
    MailboxChanged {
        unread: usize,
        inbox: usize,
        deleted: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    /// The character screen now displays `character`.
    CharacterSelected { character: CharacterId },
    LevelUpRequested { character: CharacterId },

    LevelUpSucceeded(LevelUpReceipt),
    LevelUpFailed {
        character: CharacterId,
        phase: TransactionPhase,
        error: LevelUpError,
    },
    LevelUpAvailability { character: CharacterId, enabled: bool },
    StatsUpdated {
        character: CharacterId,
        level: u32,
        power: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    EquipRequested {
        character: CharacterId,
        slot: usize,
        equipment: EquipmentId,
    },
    UnequipRequested { character: CharacterId, slot: usize },
    UnequipAllRequested { character: CharacterId },
    AutoEquipRequested { character: CharacterId },

    GearChanged(GearReceipt),
    GearFailed {
        character: CharacterId,
        error: GearError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    FundsUpdated { gold: u32, gems: u32 },
    PotionsUpdated {
        health_potions: u32,
        level_up_potions: u32,
    },
    /// Intermediate value of an animated balance counter.
    CounterTick { currency: CurrencyKind, value: u32 },
}

/// Orientation of the host window, as reported by its media query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Aspect {
    Landscape,
    Portrait,
    #[default]
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// The settings screen submitted new values.
    SettingsUpdated(Settings),
    ResetFundsRequested,
    ResetLevelsRequested,
    AspectChanged(Aspect),

    /// New settings were committed to the player state.
    SettingsApplied(Settings),
    /// Theme class, formatted `<aspect>--<theme>`.
    ThemeChanged(String),
    FpsCounterToggled(bool),
    /// `-1` requests an unlimited frame rate.
    TargetFrameRateSet(i32),
    RequestFailed {
        request: SettingsRequest,
        phase: TransactionPhase,
        error: InvariantViolation,
    },
}

/// Settings-screen request that runs as a transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum SettingsRequest {
    UpdateSettings,
    ResetFunds,
    ResetLevels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeEvent {
    WelcomeMessage(String),
    LevelMeterUpdated(LevelMeter),
    /// Text of a chat line typed so far.
    ChatTyped { speaker: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    Loaded { new_game: bool },
    Saved,
    SaveFailed { reason: String },
}
