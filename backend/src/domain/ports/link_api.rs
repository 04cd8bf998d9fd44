//! Driven port for the Link company provisioning API.
//!
//! Link authenticates with a static service token owned by the adapter; the
//! domain only sees companies and the per-company token they carry.

use async_trait::async_trait;

use super::RemoteApiError;
use crate::domain::{Company, CompanyId};

/// Company lookup and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// Create a company. `name` defaults to [`CompanyId::default_company_name`].
    ///
    /// Creating an id that already exists surfaces the remote's conflict
    /// status as [`RemoteApiError::HttpStatus`].
    async fn create_company(
        &self,
        company_id: &CompanyId,
        name: Option<String>,
    ) -> Result<Company, RemoteApiError>;

    /// Fetch a company. Unknown ids fail with a 404 status error.
    async fn get_company(&self, company_id: &CompanyId) -> Result<Company, RemoteApiError>;
}
