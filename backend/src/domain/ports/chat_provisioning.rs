//! Driving port used by the page to provision spreadsheets and chats.
//!
//! Inbound adapters call this port without knowing about Link, Copilot or
//! the local dataset, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Chat, ChatId, Error, SpreadsheetId};

/// Use-cases behind the `upload` and `new_chat` page actions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvisioning: Send + Sync {
    /// Upload the dataset and register its spreadsheet.
    async fn upload_dataset(&self) -> Result<SpreadsheetId, Error>;

    /// Create a chat bound to a previously registered spreadsheet.
    async fn open_chat(&self, spreadsheet_id: SpreadsheetId) -> Result<Chat, Error>;
}

/// In-memory test double for handler tests and doc examples.
///
/// Every upload yields spreadsheet `1`; chats point at `https://chat.invalid/<id>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatProvisioning;

#[async_trait]
impl ChatProvisioning for FixtureChatProvisioning {
    async fn upload_dataset(&self) -> Result<SpreadsheetId, Error> {
        Ok(SpreadsheetId::new(1))
    }

    async fn open_chat(&self, spreadsheet_id: SpreadsheetId) -> Result<Chat, Error> {
        Ok(Chat {
            id: ChatId::new(spreadsheet_id.get()),
            name: "Orders".to_owned(),
            url: format!("https://chat.invalid/{spreadsheet_id}"),
        })
    }
}
