//! Wiring of the provisioning service onto the real outbound adapters.

use std::sync::Arc;

use tracing::info;

use crate::domain::{ChatProvisioningService, orders_spreadsheet};
use crate::inbound::http::state::HttpState;
use crate::outbound::copilot::CopilotHttpApi;
use crate::outbound::dataset::LocalCsvDataset;
use crate::outbound::link::LinkHttpApi;
use crate::outbound::rest::RestClient;

use super::StartupError;
use super::config::ProvisioningConfig;

/// Build handler state backed by the Link and Copilot REST adapters and the
/// local orders dataset.
///
/// Both adapters share one connection pool.
///
/// # Errors
///
/// Returns [`StartupError`] when the HTTP client cannot be built or the
/// orders schema fails validation.
pub fn build_http_state(config: &ProvisioningConfig) -> Result<HttpState, StartupError> {
    let client = RestClient::new(&config.remote)?;
    let link = LinkHttpApi::new(client.clone(), config.link_token.clone());
    let copilot = CopilotHttpApi::new(client);
    let dataset = LocalCsvDataset::new(config.csv_path.clone());

    info!(
        api_url = %config.remote.base_url,
        company_id = %config.company_id,
        csv_path = %config.csv_path.display(),
        "provisioning service configured"
    );

    let service = ChatProvisioningService::new(
        Arc::new(link),
        Arc::new(copilot),
        Arc::new(dataset),
        config.company_id.clone(),
        orders_spreadsheet()?,
    );
    Ok(HttpState::new(Arc::new(service)))
}
