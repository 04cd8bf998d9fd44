//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The spreadsheet registered by `upload` lives in the encrypted session
//! cookie, so `new_chat` never trusts a client-supplied id on its own.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::domain::{Error, SpreadsheetId};

pub(crate) const SPREADSHEET_ID_KEY: &str = "spreadsheet_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the spreadsheet registered for this browser session.
    pub fn persist_spreadsheet_id(&self, spreadsheet_id: SpreadsheetId) -> Result<(), Error> {
        self.0
            .insert(SPREADSHEET_ID_KEY, spreadsheet_id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Spreadsheet registered for this session, if any.
    pub fn spreadsheet_id(&self) -> Result<Option<SpreadsheetId>, Error> {
        self.0
            .get::<SpreadsheetId>(SPREADSHEET_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Resolve the spreadsheet a chat should be opened for.
    ///
    /// # Errors
    ///
    /// - `400 invalid_request` when nothing was uploaded in this session.
    /// - `403 forbidden` when `submitted` names a different spreadsheet.
    pub fn require_spreadsheet_id(
        &self,
        submitted: Option<SpreadsheetId>,
    ) -> Result<SpreadsheetId, Error> {
        let stored = self.spreadsheet_id()?.ok_or_else(|| {
            Error::invalid_request("upload the dataset before creating a chat")
                .with_details(json!({ "field": "action", "code": "no_spreadsheet" }))
        })?;
        match submitted {
            Some(id) if id != stored => Err(Error::forbidden(
                "spreadsheet_id does not belong to this session",
            )
            .with_details(json!({ "field": "spreadsheet_id", "code": "spreadsheet_mismatch" }))),
            _ => Ok(stored),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set/{id}",
                web::get().to(|session: SessionContext, id: web::Path<i64>| async move {
                    session.persist_spreadsheet_id(SpreadsheetId::new(id.into_inner()))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/require",
                web::get().to(
                    |session: SessionContext, query: web::Query<Submitted>| async move {
                        let id = session
                            .require_spreadsheet_id(query.into_inner().id.map(SpreadsheetId::new))?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    },
                ),
            )
    }

    #[derive(serde::Deserialize)]
    struct Submitted {
        id: Option<i64>,
    }

    #[rstest]
    #[case::no_submission("/require", StatusCode::OK)]
    #[case::matching("/require?id=42", StatusCode::OK)]
    #[case::mismatching("/require?id=43", StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn submitted_ids_must_match_the_session(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = test::init_service(session_test_app()).await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set/42").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::OK {
            assert_eq!(test::read_body(res).await, "42");
        }
    }

    #[actix_web::test]
    async fn missing_upload_is_a_bad_request() {
        let app = test::init_service(session_test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/require?id=42").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
