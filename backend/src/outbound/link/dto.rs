//! Wire shapes of the Link company endpoints.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BearerToken, Company, CompanyApiToken, CompanyId, CompanyLinkPage};

#[derive(Debug, Serialize)]
pub(super) struct CreateCompanyRequestDto<'a> {
    pub(super) id: &'a str,
    pub(super) name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompanyDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) created_at: String,
    #[serde(default)]
    pub(super) link_page: Option<LinkPageDto>,
    pub(super) api_token: ApiTokenDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct LinkPageDto {
    #[serde(default)]
    pub(super) url: Option<String>,
    pub(super) enabled: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiTokenDto {
    pub(super) token: String,
    pub(super) expires_at: i64,
}

impl CompanyDto {
    pub(super) fn into_domain(self) -> Result<Company, String> {
        let id = CompanyId::new(self.id).map_err(|error| format!("company id: {error}"))?;
        let token =
            BearerToken::new(self.api_token.token).map_err(|error| format!("api token: {error}"))?;
        Ok(Company {
            id,
            name: self.name,
            created_at: parse_timestamp(&self.created_at)?,
            link_page: self.link_page.map(|page| CompanyLinkPage {
                url: page.url,
                enabled: page.enabled,
            }),
            api_token: CompanyApiToken {
                token,
                expires_at: self.api_token.expires_at,
            },
        })
    }
}

/// RFC 3339, or an offset-less ISO timestamp read as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|error| format!("created_at {raw:?}: {error}"))
}
