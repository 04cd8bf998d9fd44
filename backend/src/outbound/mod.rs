//! Outbound adapters implementing the driven ports.
//!
//! - **rest**: shared reqwest client (bearer auth, status mapping)
//! - **link**: Link company API
//! - **copilot**: Copilot SaaS API
//! - **dataset**: local CSV file

pub mod copilot;
pub mod dataset;
pub mod link;
pub mod rest;
