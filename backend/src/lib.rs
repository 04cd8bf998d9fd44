//! Copilot portal library modules.
//!
//! A single page walks a visitor through uploading the orders dataset to
//! Copilot and opening a chat over it. `domain` holds the provisioning rules,
//! `outbound` talks to the Link and Copilot APIs, `inbound` serves the page
//! and `server` wires them together.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
