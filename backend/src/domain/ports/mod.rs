//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod chat_provisioning;
mod copilot_api;
mod dataset_source;
mod link_api;
mod remote_api_error;

#[cfg(test)]
pub use chat_provisioning::MockChatProvisioning;
pub use chat_provisioning::{ChatProvisioning, FixtureChatProvisioning};
#[cfg(test)]
pub use copilot_api::MockCopilotApi;
pub use copilot_api::CopilotApi;
#[cfg(test)]
pub use dataset_source::MockDatasetSource;
pub use dataset_source::{DatasetSource, DatasetSourceError};
#[cfg(test)]
pub use link_api::MockLinkApi;
pub use link_api::LinkApi;
pub use remote_api_error::RemoteApiError;
