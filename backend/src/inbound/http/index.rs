//! Page handlers.
//!
//! ```text
//! GET  /                                   -> upload step
//! POST / action=upload                     -> new chat step
//! POST / action=new_chat&spreadsheet_id=N  -> chat link
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, SpreadsheetId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::page::{ACTION_NEW_CHAT, ACTION_UPLOAD, PageState};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form posted by the page buttons.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    Upload,
    NewChat,
}

impl PageAction {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            Some(ACTION_UPLOAD) => Some(Self::Upload),
            Some(ACTION_NEW_CHAT) => Some(Self::NewChat),
            _ => None,
        }
    }
}

/// Render the initial upload step.
#[get("/")]
pub async fn show_page() -> HttpResponse {
    PageState::Upload.into_response()
}

/// Advance the flow according to the posted `action`.
///
/// Unknown or missing actions re-render the upload step.
#[post("/")]
pub async fn submit_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PageForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let next = match PageAction::parse(form.action.as_deref()) {
        Some(PageAction::Upload) => {
            let spreadsheet_id = state.provisioning.upload_dataset().await?;
            session.persist_spreadsheet_id(spreadsheet_id)?;
            PageState::NewChat { spreadsheet_id }
        }
        Some(PageAction::NewChat) => {
            let submitted = parse_submitted_id(form.spreadsheet_id.as_deref())?;
            let spreadsheet_id = session.require_spreadsheet_id(submitted)?;
            let chat = state.provisioning.open_chat(spreadsheet_id).await?;
            PageState::Chat { chat_url: chat.url }
        }
        None => {
            debug!(action = ?form.action, "unrecognised page action");
            PageState::Upload
        }
    };
    Ok(next.into_response())
}

/// Fallback for unmatched routes, answered with the JSON error envelope.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("no such page"))
}

fn parse_submitted_id(raw: Option<&str>) -> Result<Option<SpreadsheetId>, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            Error::invalid_request("spreadsheet_id must be an integer").with_details(
                json!({ "field": "spreadsheet_id", "code": "invalid_spreadsheet_id" }),
            )
        }),
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
