//! Per-message mailbox flags.

use bitflags::bitflags;

use crate::state::types::MessageId;

bitflags! {
    /// Lifecycle flags of a mail message.
    ///
    /// `CLAIMED` is one-way: once set no transaction clears it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MailFlags: u8 {
        const READ    = 1 << 0;
        const DELETED = 1 << 1;
        const CLAIMED = 1 << 2;
    }
}

/// Mailbox record of one message; content lives in the catalog template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailState {
    pub id: MessageId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: MailFlags,
}

impl MailState {
    pub fn new(id: MessageId) -> Self {
        Self {
            id,
            flags: MailFlags::empty(),
        }
    }

    pub fn with_flags(id: MessageId, flags: MailFlags) -> Self {
        Self { id, flags }
    }

    pub fn is_read(&self) -> bool {
        self.flags.contains(MailFlags::READ)
    }

    pub fn is_deleted(&self) -> bool {
        self.flags.contains(MailFlags::DELETED)
    }

    pub fn is_claimed(&self) -> bool {
        self.flags.contains(MailFlags::CLAIMED)
    }
}
