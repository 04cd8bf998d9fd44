//! Startup configuration.
//!
//! [`PortalSettings`] is layered by `ortho_config` from defaults, config
//! files, `PORTAL_*` environment variables and CLI flags. It is converted once
//! into the explicit objects handed to each component; nothing reads the
//! environment after startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{BearerToken, CompanyId};
use crate::outbound::rest::RemoteApiConfig;

pub const DEFAULT_API_URL: &str = "https://api.getconduit.app/";
pub const DEFAULT_COMPANY_ID: &str = "1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_CSV_RELATIVE_PATH: &str = "files/orders.csv";

/// Errors raised while turning settings into component configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Raw portal settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Base URL of the Link and Copilot APIs.
    pub api_url: Option<String>,
    /// Static service token for the Link API. Required.
    pub link_token: Option<String>,
    /// Company whose Copilot token is used.
    pub company_id: Option<String>,
    /// Directory the default dataset path is resolved against.
    pub base_dir: Option<PathBuf>,
    /// Dataset path override.
    pub csv_path: Option<PathBuf>,
    /// Outbound request timeout; unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    /// Listen address.
    pub bind_addr: Option<String>,
    /// Session key file.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    ///
    /// Boolean toggles are env/file only: a clap `SetTrue` flag always parses
    /// to `false` and would mask the environment.
    #[ortho_config(default = false, skip_cli)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
}

/// Everything needed to wire the provisioning service.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    pub remote: RemoteApiConfig,
    pub link_token: BearerToken,
    pub company_id: CompanyId,
    pub csv_path: PathBuf,
}

impl PortalSettings {
    /// Parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL does not parse.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).map_err(|error| ConfigError::invalid("api_url", error))
    }

    /// Link service token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when unset or blank.
    pub fn link_token(&self) -> Result<BearerToken, ConfigError> {
        let raw = self
            .link_token
            .clone()
            .ok_or(ConfigError::Missing { name: "link_token" })?;
        BearerToken::new(raw).map_err(|_| ConfigError::Missing { name: "link_token" })
    }

    /// Company identifier, defaulting to `1`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for ids that are not path safe.
    pub fn company_id(&self) -> Result<CompanyId, ConfigError> {
        let raw = self.company_id.as_deref().unwrap_or(DEFAULT_COMPANY_ID);
        CompanyId::new(raw).map_err(|error| ConfigError::invalid("company_id", error))
    }

    /// Base directory, defaulting to the working directory.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Dataset path, defaulting to `<base_dir>/files/orders.csv`.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.csv_path
            .clone()
            .unwrap_or_else(|| self.base_dir().join(DEFAULT_CSV_RELATIVE_PATH))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|error| ConfigError::invalid("bind_addr", error))
    }

    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Connection settings for the REST adapters.
    ///
    /// # Errors
    ///
    /// Propagates [`PortalSettings::api_url`] failures.
    pub fn remote_api_config(&self) -> Result<RemoteApiConfig, ConfigError> {
        let config = RemoteApiConfig::new(self.api_url()?);
        Ok(match self.request_timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    }

    /// Resolve every setting the provisioning service needs.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid setting.
    pub fn provisioning_config(&self) -> Result<ProvisioningConfig, ConfigError> {
        Ok(ProvisioningConfig {
            remote: self.remote_api_config()?,
            link_token: self.link_token()?,
            company_id: self.company_id()?,
            csv_path: self.csv_path(),
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Settings layering and conversion.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "PORTAL_API_URL",
        "PORTAL_LINK_TOKEN",
        "PORTAL_COMPANY_ID",
        "PORTAL_BASE_DIR",
        "PORTAL_CSV_PATH",
        "PORTAL_REQUEST_TIMEOUT_SECS",
        "PORTAL_BIND_ADDR",
        "PORTAL_SESSION_KEY_FILE",
        "PORTAL_SESSION_ALLOW_EPHEMERAL",
        "PORTAL_COOKIE_SECURE",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> PortalSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        PortalSettings::load_from_iter([OsString::from("copilot-portal")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);

        assert_eq!(settings.api_url().expect("url").as_str(), DEFAULT_API_URL);
        assert_eq!(settings.company_id().expect("id").as_ref(), "1");
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(settings.session_key_file(), PathBuf::from(DEFAULT_SESSION_KEY_FILE));
        assert_eq!(settings.csv_path(), settings.base_dir().join("files/orders.csv"));
        assert!(settings.request_timeout().is_none());
        assert!(settings.cookie_secure);
        assert!(!settings.session_allow_ephemeral);
    }

    #[rstest]
    fn link_token_is_required() {
        let settings = load_with(&[]);
        assert!(matches!(
            settings.provisioning_config(),
            Err(ConfigError::Missing { name: "link_token" })
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("PORTAL_API_URL", "http://localhost:9000/api/"),
            ("PORTAL_LINK_TOKEN", "link-secret"),
            ("PORTAL_COMPANY_ID", "acme"),
            ("PORTAL_BASE_DIR", "/srv/portal"),
            ("PORTAL_REQUEST_TIMEOUT_SECS", "5"),
            ("PORTAL_BIND_ADDR", "127.0.0.1:9090"),
            ("PORTAL_COOKIE_SECURE", "false"),
            ("PORTAL_SESSION_ALLOW_EPHEMERAL", "true"),
        ]);

        let provisioning = settings.provisioning_config().expect("complete settings");
        assert_eq!(provisioning.remote.base_url.as_str(), "http://localhost:9000/api/");
        assert_eq!(provisioning.remote.timeout, Some(Duration::from_secs(5)));
        assert_eq!(provisioning.link_token.expose(), "link-secret");
        assert_eq!(provisioning.company_id.as_ref(), "acme");
        assert_eq!(provisioning.csv_path, PathBuf::from("/srv/portal/files/orders.csv"));
        assert_eq!(settings.bind_addr().expect("addr").port(), 9090);
        assert!(!settings.cookie_secure);
        assert!(settings.session_allow_ephemeral);
    }

    #[rstest]
    #[case("PORTAL_COMPANY_ID", "../etc")]
    #[case("PORTAL_API_URL", "not a url")]
    fn malformed_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let settings = load_with(&[("PORTAL_LINK_TOKEN", "t"), (name, value)]);
        assert!(matches!(
            settings.provisioning_config(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
