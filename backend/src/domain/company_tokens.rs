//! Company token lookup with create-on-miss fallback.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{LinkApi, RemoteApiError};
use crate::domain::{CompanyApiToken, CompanyId};

/// Resolves the Copilot token of a company, creating the company when Link
/// does not know it yet.
pub struct CompanyTokens<L> {
    link: Arc<L>,
}

impl<L> Clone for CompanyTokens<L> {
    fn clone(&self) -> Self {
        Self {
            link: Arc::clone(&self.link),
        }
    }
}

impl<L> CompanyTokens<L> {
    pub fn new(link: Arc<L>) -> Self {
        Self { link }
    }
}

impl<L> CompanyTokens<L>
where
    L: LinkApi,
{
    /// Token of `company_id`.
    ///
    /// A 404 from the lookup triggers exactly one `create_company` call with
    /// the default name; every other failure is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`RemoteApiError`] of the failing Link call.
    pub async fn get_company_token(
        &self,
        company_id: &CompanyId,
    ) -> Result<CompanyApiToken, RemoteApiError> {
        match self.link.get_company(company_id).await {
            Ok(company) => Ok(company.api_token),
            Err(error) if error.is_not_found() => {
                info!(%company_id, "company unknown to link api; creating it");
                let company = self.link.create_company(company_id, None).await?;
                Ok(company.api_token)
            }
            Err(error) => Err(error),
        }
    }
}
