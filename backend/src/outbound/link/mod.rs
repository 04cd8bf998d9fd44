//! Link API adapter.
//!
//! Implements the `LinkApi` port over `/link/company/` using the static
//! service token.

mod dto;
mod http_api;

pub use http_api::LinkHttpApi;
