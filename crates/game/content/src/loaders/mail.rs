//! Mail template loader.

use std::path::Path;

use menu_core::MailTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, parse_ron, read_file};

/// Mail catalog structure for RON files. Dates are `"YYYY-MM-DD"` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailCatalog {
    pub messages: Vec<MailTemplate>,
}

/// Loader for mail templates from RON files.
pub struct MailLoader;

impl MailLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MailTemplate>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MailTemplate>> {
        let catalog: MailCatalog = parse_ron(content, "mail catalog")?;
        ensure_unique_ids(&catalog.messages, |message| message.id, "mail message")?;
        Ok(catalog.messages)
    }
}
