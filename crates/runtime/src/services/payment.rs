//! External payment collaborator for real-money listings.

use std::fmt;

use menu_core::{Price, ShopItemDefinition};

/// Terminal answer of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Accepted,
    Declined { reason: String },
}

/// Settles real-money purchases outside the in-game balances.
///
/// Asked once per purchase, only after the transaction has passed
/// validation, and its answer decides whether the result is committed. It
/// runs while the player state is locked, so it must not publish on the bus.
pub trait PaymentProcessor: Send + Sync + fmt::Debug {
    fn authorize(&self, item: &ShopItemDefinition, price: Price) -> PaymentOutcome;
}

/// Accepts every payment. Stands in until a store integration exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderPayments;

impl PaymentProcessor for PlaceholderPayments {
    fn authorize(&self, item: &ShopItemDefinition, price: Price) -> PaymentOutcome {
        tracing::info!(item = %item.id, %price, "placeholder payment accepted");
        PaymentOutcome::Accepted
    }
}
