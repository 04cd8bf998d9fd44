//! Server-rendered page for the upload → new chat → chat flow.
//!
//! The page has three mutually exclusive states. Every dynamic value is HTML
//! escaped before it is written into the markup.

use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};

use crate::domain::SpreadsheetId;

/// Form `action` that uploads the dataset.
pub const ACTION_UPLOAD: &str = "upload";
/// Form `action` that opens a chat.
pub const ACTION_NEW_CHAT: &str = "new_chat";

/// Which step of the flow the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Initial state: offer the upload.
    Upload,
    /// Spreadsheet registered: offer chat creation.
    NewChat { spreadsheet_id: SpreadsheetId },
    /// Chat created: link to it.
    Chat { chat_url: String },
}

impl PageState {
    /// Full HTML document for this state.
    #[must_use]
    pub fn render(&self) -> String {
        let body = match self {
            Self::Upload => concat!(
                "<p>Upload <code>orders.csv</code> to register the Orders spreadsheet.</p>\n",
                "<form method=\"post\" action=\"/\">\n",
                "  <button type=\"submit\" name=\"action\" value=\"upload\">Upload file</button>\n",
                "</form>\n",
            )
            .to_owned(),
            Self::NewChat { spreadsheet_id } => {
                let id = escape_html(&spreadsheet_id.to_string());
                format!(
                    concat!(
                        "<p>Spreadsheet <strong>{id}</strong> is ready.</p>\n",
                        "<form method=\"post\" action=\"/\">\n",
                        "  <input type=\"hidden\" name=\"spreadsheet_id\" value=\"{id}\">\n",
                        "  <button type=\"submit\" name=\"action\" value=\"new_chat\">Create chat</button>\n",
                        "</form>\n",
                    ),
                    id = id,
                )
            }
            Self::Chat { chat_url } => {
                let url = escape_html(chat_url);
                format!(
                    concat!(
                        "<p>Your chat is ready.</p>\n",
                        "<p><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{url}</a></p>\n",
                    ),
                    url = url,
                )
            }
        };
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"en\">\n",
                "<head>\n",
                "  <meta charset=\"utf-8\">\n",
                "  <title>Orders Copilot</title>\n",
                "</head>\n",
                "<body>\n",
                "<main>\n",
                "<h1>Orders Copilot</h1>\n",
                "{body}",
                "</main>\n",
                "</body>\n",
                "</html>\n",
            ),
            body = body,
        )
    }

    /// `200 OK` response carrying the rendered page.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok()
            .content_type(ContentType::html())
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .body(self.render())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PageState::Upload, "value=\"upload\"", "new_chat")]
    #[case(
        PageState::NewChat { spreadsheet_id: SpreadsheetId::new(42) },
        "name=\"spreadsheet_id\" value=\"42\"",
        "value=\"upload\""
    )]
    #[case(
        PageState::Chat { chat_url: "https://copilot.example/chat/7".to_owned() },
        "href=\"https://copilot.example/chat/7\"",
        "<form"
    )]
    fn each_state_renders_only_its_step(
        #[case] state: PageState,
        #[case] present: &str,
        #[case] absent: &str,
    ) {
        let html = state.render();
        assert!(html.contains(present), "{html}");
        assert!(!html.contains(absent), "{html}");
    }

    #[test]
    fn chat_urls_are_escaped() {
        let chat_url = "https://copilot.example/chat?a=1&b=\"x\"".to_owned();
        let html = PageState::Chat { chat_url }.render();
        assert!(html.contains("a=1&amp;b=&quot;x&quot;"), "{html}");
        assert!(!html.contains("&b="));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html("<a href='x'>\"&\"</a>"),
            "&lt;a href=&#x27;x&#x27;&gt;&quot;&amp;&quot;&lt;/a&gt;"
        );
    }
}
