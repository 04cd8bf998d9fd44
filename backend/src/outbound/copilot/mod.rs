//! Copilot SaaS adapter.
//!
//! Implements the `CopilotApi` port: multipart file upload, spreadsheet
//! registration and chat creation, all authenticated with a company token.

mod dto;
mod http_api;

pub use http_api::CopilotHttpApi;
