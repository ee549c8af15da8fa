use chrono::NaiveDate;

use crate::catalog::Reward;
use crate::state::types::MessageId;

pub trait MailOracle: Send + Sync {
    fn template(&self, id: MessageId) -> Option<MailTemplate>;

    /// Every template, ordered by id.
    fn all_templates(&self) -> Vec<MailTemplate>;
}

/// Static content of a mail message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailTemplate {
    pub id: MessageId,
    pub sender: String,
    pub subject: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: String,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<Reward>,
    /// Unread when a new game seeds the mailbox.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub starts_new: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starts_deleted: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl MailTemplate {
    pub fn new(
        id: MessageId,
        sender: impl Into<String>,
        subject: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            subject: subject.into(),
            body: String::new(),
            date,
            reward: None,
            starts_new: true,
            starts_deleted: false,
        }
    }

    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.reward = Some(reward);
        self
    }
}
