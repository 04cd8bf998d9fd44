//! Wire shapes of the Copilot endpoints.
//!
//! Request DTOs flatten [`ColumnSpec`](crate::domain::ColumnSpec) into the
//! `kind`/`type`/`agg` triple Copilot expects.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AggregationType, Chat, ChatId, ColumnKind, ColumnType, Separator, Spreadsheet,
    SpreadsheetColumn, SpreadsheetId, UploadedFile,
};

const SPREADSHEET_DATASET: &str = "SPREADSHEET";

#[derive(Debug, Serialize)]
pub(super) struct CreateSpreadsheetRequestDto<'a> {
    pub(super) file_id: i64,
    pub(super) name: &'a str,
    pub(super) thousands_separator: Separator,
    pub(super) decimal_separator: Separator,
    pub(super) read_from_line: u32,
    pub(super) columns: Vec<ColumnDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ColumnDto<'a> {
    pub(super) is_enabled: bool,
    pub(super) name: &'a str,
    pub(super) kind: ColumnKind,
    #[serde(rename = "type")]
    pub(super) column_type: ColumnType,
    pub(super) agg: AggregationType,
    pub(super) description: &'a str,
}

impl<'a> CreateSpreadsheetRequestDto<'a> {
    pub(super) fn new(file: UploadedFile, spreadsheet: &'a Spreadsheet) -> Self {
        let separators = spreadsheet.separators();
        Self {
            file_id: file.file_id,
            name: spreadsheet.name(),
            thousands_separator: separators.thousands(),
            decimal_separator: separators.decimal(),
            read_from_line: spreadsheet.read_from_line().get(),
            columns: spreadsheet.columns().iter().map(ColumnDto::from).collect(),
        }
    }
}

impl<'a> From<&'a SpreadsheetColumn> for ColumnDto<'a> {
    fn from(column: &'a SpreadsheetColumn) -> Self {
        Self {
            is_enabled: column.is_enabled,
            name: &column.name,
            kind: column.spec.kind(),
            column_type: column.spec.column_type(),
            agg: column.spec.aggregation(),
            description: &column.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateChatRequestDto<'a> {
    pub(super) name: &'a str,
    pub(super) datasets: [ChatDatasetDto; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct ChatDatasetDto {
    #[serde(rename = "type")]
    pub(super) dataset_type: &'static str,
    pub(super) id: i64,
}

impl<'a> CreateChatRequestDto<'a> {
    pub(super) fn new(name: &'a str, spreadsheet_id: SpreadsheetId) -> Self {
        Self {
            name,
            datasets: [ChatDatasetDto {
                dataset_type: SPREADSHEET_DATASET,
                id: spreadsheet_id.get(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadedFileDto {
    pub(super) file_id: i64,
}

impl From<UploadedFileDto> for UploadedFile {
    fn from(value: UploadedFileDto) -> Self {
        Self {
            file_id: value.file_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SpreadsheetIdDto {
    pub(super) id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatDto {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) url: String,
}

impl ChatDto {
    pub(super) fn into_domain(self) -> Result<Chat, String> {
        if self.url.trim().is_empty() {
            return Err(format!("chat {} has no url", self.id));
        }
        Ok(Chat {
            id: ChatId::new(self.id),
            name: self.name,
            url: self.url,
        })
    }
}
