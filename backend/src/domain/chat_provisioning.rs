//! Spreadsheet and chat provisioning.
//!
//! Implements the [`ChatProvisioning`] driving port on top of the Link,
//! Copilot and dataset driven ports. Remote calls within one use-case run
//! sequentially and nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::company_tokens::CompanyTokens;
use crate::domain::ports::{
    ChatProvisioning, CopilotApi, DatasetSource, DatasetSourceError, LinkApi, RemoteApiError,
};
use crate::domain::{BearerToken, Chat, CompanyId, DatasetFile, Error, Spreadsheet, SpreadsheetId};

/// Provisioning service wired to concrete driven ports.
pub struct ChatProvisioningService<L, C, D> {
    tokens: CompanyTokens<L>,
    copilot: Arc<C>,
    dataset: Arc<D>,
    company_id: CompanyId,
    spreadsheet: Spreadsheet,
}

impl<L, C, D> ChatProvisioningService<L, C, D> {
    /// Build the service. Chats are named after `spreadsheet`.
    pub fn new(
        link: Arc<L>,
        copilot: Arc<C>,
        dataset: Arc<D>,
        company_id: CompanyId,
        spreadsheet: Spreadsheet,
    ) -> Self {
        Self {
            tokens: CompanyTokens::new(link),
            copilot,
            dataset,
            company_id,
            spreadsheet,
        }
    }
}

impl<L, C, D> ChatProvisioningService<L, C, D>
where
    L: LinkApi,
    C: CopilotApi,
    D: DatasetSource,
{
    async fn company_token(&self) -> Result<BearerToken, Error> {
        self.tokens
            .get_company_token(&self.company_id)
            .await
            .map(|api_token| api_token.token)
            .map_err(|error| map_remote_error("link", error))
    }

    async fn load_dataset(&self) -> Result<DatasetFile, Error> {
        let dataset = self.dataset.load().await.map_err(map_dataset_error)?;
        let missing = self.spreadsheet.missing_columns(&dataset.headers);
        if !missing.is_empty() {
            warn!(?missing, file = %dataset.file_name, "dataset header lacks schema columns");
            return Err(Error::internal("dataset does not match the spreadsheet schema")
                .with_details(json!({ "missingColumns": missing })));
        }
        Ok(dataset)
    }
}

#[async_trait]
impl<L, C, D> ChatProvisioning for ChatProvisioningService<L, C, D>
where
    L: LinkApi,
    C: CopilotApi,
    D: DatasetSource,
{
    async fn upload_dataset(&self) -> Result<SpreadsheetId, Error> {
        let dataset = self.load_dataset().await?;
        let token = self.company_token().await?;

        let uploaded = self
            .copilot
            .upload_file(&token, &dataset)
            .await
            .map_err(|error| map_remote_error("copilot", error))?;
        info!(file_id = uploaded.file_id, file = %dataset.file_name, "dataset uploaded");

        let spreadsheet_id = self
            .copilot
            .create_spreadsheet(&token, uploaded, &self.spreadsheet)
            .await
            .map_err(|error| map_remote_error("copilot", error))?;
        info!(%spreadsheet_id, name = self.spreadsheet.name(), "spreadsheet registered");
        Ok(spreadsheet_id)
    }

    async fn open_chat(&self, spreadsheet_id: SpreadsheetId) -> Result<Chat, Error> {
        let token = self.company_token().await?;
        let chat = self
            .copilot
            .create_chat(&token, self.spreadsheet.name(), spreadsheet_id)
            .await
            .map_err(|error| map_remote_error("copilot", error))?;
        info!(chat_id = %chat.id, %spreadsheet_id, "chat created");
        Ok(chat)
    }
}

fn map_remote_error(api: &'static str, error: RemoteApiError) -> Error {
    warn!(api, %error, "remote api call failed");
    match error {
        RemoteApiError::HttpStatus { status, .. } => {
            Error::upstream_unavailable(format!("{api} api returned status {status}"))
                .with_details(json!({ "api": api, "status": status }))
        }
        RemoteApiError::Transport { .. }
        | RemoteApiError::Timeout { .. }
        | RemoteApiError::Decode { .. } => {
            Error::upstream_unavailable(format!("{api} api is unavailable"))
                .with_details(json!({ "api": api }))
        }
        RemoteApiError::InvalidRequest { message } => {
            Error::internal(format!("{api} request could not be built: {message}"))
        }
    }
}

fn map_dataset_error(error: DatasetSourceError) -> Error {
    warn!(%error, "dataset could not be loaded");
    Error::internal(error.to_string())
}

#[cfg(test)]
#[path = "chat_provisioning_tests.rs"]
mod tests;
