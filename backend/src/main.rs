//! Portal entry-point: loads settings, wires adapters and serves the page.

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use copilot_portal::inbound::http::health::HealthState;
use copilot_portal::inbound::http::state::HttpState;
use copilot_portal::server::{
    PortalSettings, ServerConfig, StartupError, build_http_state, create_server,
    load_session_key,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let (http_state, server_config) = prepare(&settings).map_err(std::io::Error::other)?;
    info!(bind_addr = %server_config.bind_addr(), "starting copilot portal");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, server_config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

fn prepare(
    settings: &PortalSettings,
) -> Result<(HttpState, ServerConfig), StartupError> {
    let http_state = build_http_state(&settings.provisioning_config()?)?;
    let allow_ephemeral = cfg!(debug_assertions) || settings.session_allow_ephemeral;
    let key = load_session_key(&settings.session_key_file(), allow_ephemeral)?;
    let server_config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr()?,
    );
    Ok((http_state, server_config))
}
