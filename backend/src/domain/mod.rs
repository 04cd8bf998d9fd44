//! Domain primitives, ports and services.
//!
//! Types here are transport agnostic: inbound adapters translate page actions
//! into [`ports::ChatProvisioning`] calls and outbound adapters implement the
//! driven ports against the Link and Copilot REST APIs.

pub mod chat;
pub mod chat_provisioning;
pub mod company;
pub mod company_tokens;
pub mod dataset;
pub mod error;
pub mod orders;
pub mod ports;
pub mod spreadsheet;
pub mod trace_id;

pub use self::chat::{Chat, ChatId};
pub use self::chat_provisioning::ChatProvisioningService;
pub use self::company::{
    BearerToken, Company, CompanyApiToken, CompanyId, CompanyLinkPage, CompanyValidationError,
};
pub use self::company_tokens::CompanyTokens;
pub use self::dataset::DatasetFile;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::orders::{ORDERS_NAME, orders_spreadsheet};
pub use self::spreadsheet::{
    AggregationType, ColumnKind, ColumnSpec, ColumnType, DimensionType, MetricAggregation,
    MetricType, ReadFromLine, Separator, Separators, Spreadsheet, SpreadsheetColumn,
    SpreadsheetId, SpreadsheetValidationError, UploadedFile,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use copilot_portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
