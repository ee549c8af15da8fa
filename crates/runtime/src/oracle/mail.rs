//! [`menu_core::MailOracle`] backed by an ordered map.
use std::collections::BTreeMap;

use menu_core::{MailOracle, MailTemplate, MessageId};

#[derive(Debug, Default)]
pub struct MailOracleImpl {
    templates: BTreeMap<MessageId, MailTemplate>,
}

impl MailOracleImpl {
    pub fn new(templates: impl IntoIterator<Item = MailTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl MailOracle for MailOracleImpl {
    fn template(&self, id: MessageId) -> Option<MailTemplate> {
        self.templates.get(&id).cloned()
    }

    fn all_templates(&self) -> Vec<MailTemplate> {
        self.templates.values().cloned().collect()
    }
}
