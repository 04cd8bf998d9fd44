//! HTTP inbound adapter: the page and the health probes.

pub mod error;
pub mod health;
pub mod index;
pub mod page;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
