//! Company records provisioned through the Link API.
//!
//! A company is identified by a caller-chosen id and carries the bearer token
//! used for every Copilot call made on its behalf.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

/// Validation errors for company identifiers and tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyValidationError {
    /// Identifier was empty.
    #[error("company id must not be empty")]
    EmptyId,
    /// Identifier contained characters unsafe for a URL path segment.
    #[error("company id may only contain ASCII letters, digits, '-' or '_'")]
    InvalidId,
    /// Token was empty.
    #[error("api token must not be empty")]
    EmptyToken,
}

/// Caller-supplied company identifier.
///
/// ## Invariants
/// - Non-empty.
/// - Only ASCII letters, digits, `-` and `_`, so it can be embedded in
///   `/link/company/{id}/` without escaping.
///
/// # Examples
/// ```
/// use copilot_portal::domain::CompanyId;
///
/// let id = CompanyId::new("1").expect("valid id");
/// assert_eq!(id.as_ref(), "1");
/// assert!(CompanyId::new("../1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyId(String);

static COMPANY_ID_RE: OnceLock<Regex> = OnceLock::new();

fn company_id_regex() -> &'static Regex {
    COMPANY_ID_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("company id regex failed to compile: {error}"))
    })
}

impl CompanyId {
    /// Validate and construct a [`CompanyId`].
    ///
    /// # Errors
    ///
    /// Returns [`CompanyValidationError`] when the id is empty or contains
    /// characters outside the allowed set.
    pub fn new(id: impl Into<String>) -> Result<Self, CompanyValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CompanyValidationError::EmptyId);
        }
        if !company_id_regex().is_match(&id) {
            return Err(CompanyValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Name used when a company is created without an explicit one.
    #[must_use]
    pub fn default_company_name(&self) -> String {
        format!("Company #{}", self.0)
    }
}

impl AsRef<str> for CompanyId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret bearer token sent in `Authorization` headers.
///
/// `Debug` output is redacted and the backing memory is cleared on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyValidationError::EmptyToken`] for blank input.
    pub fn new(token: impl Into<String>) -> Result<Self, CompanyValidationError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(CompanyValidationError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Raw token text for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// API token issued to a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyApiToken {
    /// Bearer token for Copilot calls.
    pub token: BearerToken,
    /// Expiry as Unix epoch seconds. Not refreshed; used as-is.
    pub expires_at: i64,
}

/// Public link page settings for a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyLinkPage {
    pub url: Option<String>,
    pub enabled: bool,
}

/// Company record returned by the Link API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub link_page: Option<CompanyLinkPage>,
    pub api_token: CompanyApiToken,
}
