//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving port, so
//! they stay testable without network access.

use std::sync::Arc;

use crate::domain::ports::ChatProvisioning;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub provisioning: Arc<dyn ChatProvisioning>,
}

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use copilot_portal::domain::ports::FixtureChatProvisioning;
    /// use copilot_portal::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureChatProvisioning));
    /// let _provisioning = state.provisioning.clone();
    /// ```
    pub fn new(provisioning: Arc<dyn ChatProvisioning>) -> Self {
        Self { provisioning }
    }
}
