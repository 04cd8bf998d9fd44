//! Driven port for the Copilot SaaS API.

use async_trait::async_trait;

use super::RemoteApiError;
use crate::domain::{
    BearerToken, Chat, DatasetFile, Spreadsheet, SpreadsheetId, UploadedFile,
};

/// File upload, spreadsheet registration and chat creation.
///
/// Every call authenticates with the company token obtained from Link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CopilotApi: Send + Sync {
    /// Upload the CSV as a multipart `file` part.
    async fn upload_file(
        &self,
        token: &BearerToken,
        dataset: &DatasetFile,
    ) -> Result<UploadedFile, RemoteApiError>;

    /// Register `spreadsheet` as the schema of an uploaded file.
    async fn create_spreadsheet(
        &self,
        token: &BearerToken,
        file: UploadedFile,
        spreadsheet: &Spreadsheet,
    ) -> Result<SpreadsheetId, RemoteApiError>;

    /// Open a chat over one spreadsheet.
    async fn create_chat(
        &self,
        token: &BearerToken,
        name: &str,
        spreadsheet_id: SpreadsheetId,
    ) -> Result<Chat, RemoteApiError>;
}
