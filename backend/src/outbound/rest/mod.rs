//! Shared REST plumbing for the Link and Copilot adapters.
//!
//! Every remote call goes through [`RestClient::request`]: one attempt,
//! bearer authentication, non-2xx mapped to
//! [`RemoteApiError::HttpStatus`](crate::domain::ports::RemoteApiError).

mod client;

pub use client::{RemoteApiConfig, RequestBody, RestClient};
