//! Common error infrastructure for menu-core.
//!
//! Domain-specific errors (e.g. `PurchaseError`, `LevelUpError`) live next to
//! the transactions that raise them. This module provides the shared
//! classification every one of them reports through [`GameError`].
//!
//! # Design Principles
//!
//! - **Values, not panics**: insufficient funds is a frequent, expected outcome
//!   and travels as an `Err` value the caller branches on
//! - **Severity Classification**: errors are categorized so hosts can decide
//!   between a user-facing failure event, a log line, or a bug report

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Rejected transaction: insufficient funds or potions, unknown id,
    /// duplicate claim. Recovered locally and surfaced as a failure event.
    Validation,

    /// Save or load I/O failure. Recovered by keeping the last good in-memory
    /// state or falling back to a new game.
    Persistence,

    /// Catalog reference missing. The affected datum is skipped.
    DataIntegrity,

    /// Aggregate invariant violated after a transaction was applied.
    ///
    /// These indicate bugs; the transaction is discarded.
    Internal,
}

impl ErrorSeverity {
    /// Returns true if the session can continue normally after this error.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Internal)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all menu-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as the stable reason code carried by failure events.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
