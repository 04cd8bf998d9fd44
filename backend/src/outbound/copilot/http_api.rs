//! Reqwest-backed Copilot adapter.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::dto::{
    ChatDto, CreateChatRequestDto, CreateSpreadsheetRequestDto, SpreadsheetIdDto, UploadedFileDto,
};
use crate::domain::ports::{CopilotApi, RemoteApiError};
use crate::domain::{BearerToken, Chat, DatasetFile, Spreadsheet, SpreadsheetId, UploadedFile};
use crate::outbound::rest::{RequestBody, RestClient};

const UPLOAD_PATH: &str = "/copilot_saas/spreadsheets/upload/";
const SPREADSHEETS_PATH: &str = "/copilot_saas/spreadsheets/";
const CHATS_PATH: &str = "/copilot_saas/chats/";
const CSV_MIME: &str = "text/csv";

/// Copilot adapter. Tokens are supplied per call.
pub struct CopilotHttpApi {
    client: RestClient,
}

impl CopilotHttpApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn json_body<T: serde::Serialize>(dto: &T) -> Result<RequestBody, RemoteApiError> {
    serde_json::to_value(dto)
        .map(RequestBody::Json)
        .map_err(|error| RemoteApiError::invalid_request(error.to_string()))
}

#[async_trait]
impl CopilotApi for CopilotHttpApi {
    async fn upload_file(
        &self,
        token: &BearerToken,
        dataset: &DatasetFile,
    ) -> Result<UploadedFile, RemoteApiError> {
        let part = Part::bytes(dataset.bytes.clone())
            .file_name(dataset.file_name.clone())
            .mime_str(CSV_MIME)
            .map_err(|error| RemoteApiError::invalid_request(error.to_string()))?;
        let form = Form::new().part("file", part);

        let dto: UploadedFileDto = self
            .client
            .request(Method::POST, UPLOAD_PATH, token, RequestBody::Multipart(form))
            .await?;
        Ok(dto.into())
    }

    async fn create_spreadsheet(
        &self,
        token: &BearerToken,
        file: UploadedFile,
        spreadsheet: &Spreadsheet,
    ) -> Result<SpreadsheetId, RemoteApiError> {
        let body = json_body(&CreateSpreadsheetRequestDto::new(file, spreadsheet))?;
        let dto: SpreadsheetIdDto = self
            .client
            .request(Method::POST, SPREADSHEETS_PATH, token, body)
            .await?;
        Ok(SpreadsheetId::new(dto.id))
    }

    async fn create_chat(
        &self,
        token: &BearerToken,
        name: &str,
        spreadsheet_id: SpreadsheetId,
    ) -> Result<Chat, RemoteApiError> {
        let body = json_body(&CreateChatRequestDto::new(name, spreadsheet_id))?;
        let dto: ChatDto = self
            .client
            .request(Method::POST, CHATS_PATH, token, body)
            .await?;
        dto.into_domain().map_err(RemoteApiError::decode)
    }
}
