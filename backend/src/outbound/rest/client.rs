//! Reqwest-backed REST client.

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::BearerToken;
use crate::domain::ports::RemoteApiError;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Connection settings shared by every remote adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteApiConfig {
    /// Root every request path is resolved against.
    pub base_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl RemoteApiConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Request payload.
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Authenticated JSON client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &RemoteApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(config.base_url.clone()),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and decode the JSON response into `T`.
    ///
    /// `path` is resolved relative to the base URL, so a base of
    /// `https://host/api` and a path of `/link/company/` hit
    /// `https://host/api/link/company/`.
    ///
    /// # Errors
    ///
    /// - [`RemoteApiError::InvalidRequest`] when `path` does not form a URL.
    /// - [`RemoteApiError::Transport`] or [`RemoteApiError::Timeout`] when no
    ///   response arrives.
    /// - [`RemoteApiError::HttpStatus`] for any non-2xx status.
    /// - [`RemoteApiError::Decode`] when the body is not the expected JSON.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
        body: RequestBody,
    ) -> Result<T, RemoteApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json");
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|error| {
            warn!(%method, path, %error, "remote request failed");
            map_transport_error(error)
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%method, path, status = status.as_u16(), "remote request completed");
        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "remote request rejected");
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_json(body.as_ref())
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| RemoteApiError::invalid_request(format!("invalid path {path}: {error}")))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode_json<T>(body: &[u8]) -> Result<T, RemoteApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        RemoteApiError::decode(format!(
            "{error} (body: {})",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> RemoteApiError {
    if error.is_timeout() {
        RemoteApiError::timeout(error.to_string())
    } else {
        RemoteApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteApiError {
    RemoteApiError::http_status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
