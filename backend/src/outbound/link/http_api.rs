//! Reqwest-backed Link adapter.

use async_trait::async_trait;
use reqwest::Method;

use super::dto::{CompanyDto, CreateCompanyRequestDto};
use crate::domain::ports::{LinkApi, RemoteApiError};
use crate::domain::{BearerToken, Company, CompanyId};
use crate::outbound::rest::{RequestBody, RestClient};

const COMPANIES_PATH: &str = "/link/company/";

/// Link adapter authenticated with the service-level link token.
pub struct LinkHttpApi {
    client: RestClient,
    link_token: BearerToken,
}

impl LinkHttpApi {
    pub fn new(client: RestClient, link_token: BearerToken) -> Self {
        Self { client, link_token }
    }
}

#[async_trait]
impl LinkApi for LinkHttpApi {
    async fn create_company(
        &self,
        company_id: &CompanyId,
        name: Option<String>,
    ) -> Result<Company, RemoteApiError> {
        let name = name.unwrap_or_else(|| company_id.default_company_name());
        let body = serde_json::to_value(CreateCompanyRequestDto {
            id: company_id.as_ref(),
            name: &name,
        })
        .map_err(|error| RemoteApiError::invalid_request(error.to_string()))?;

        let dto: CompanyDto = self
            .client
            .request(
                Method::POST,
                COMPANIES_PATH,
                &self.link_token,
                RequestBody::Json(body),
            )
            .await?;
        dto.into_domain().map_err(RemoteApiError::decode)
    }

    async fn get_company(&self, company_id: &CompanyId) -> Result<Company, RemoteApiError> {
        let path = format!("{COMPANIES_PATH}{company_id}/");
        let dto: CompanyDto = self
            .client
            .request(Method::GET, &path, &self.link_token, RequestBody::Empty)
            .await?;
        dto.into_domain().map_err(RemoteApiError::decode)
    }
}

#[cfg(test)]
mod tests {
    //! Link adapter and token fallback against a mock Link server.

    use std::sync::Arc;

    use super::*;
    use crate::domain::CompanyTokens;
    use crate::outbound::rest::RemoteApiConfig;
    use reqwest::Url;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn company_json(id: &str, token: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Company #{id}"),
            "created_at": "2024-03-01T10:15:00Z",
            "link_page": { "url": null, "enabled": false },
            "api_token": { "token": token, "expires_at": 1_800_000_000 },
        })
    }

    fn adapter(server: &MockServer) -> LinkHttpApi {
        let base_url = Url::parse(&server.uri()).expect("mock server uri");
        let client = RestClient::new(&RemoteApiConfig::new(base_url)).expect("client");
        LinkHttpApi::new(client, BearerToken::new("link-token").expect("token"))
    }

    fn company_id() -> CompanyId {
        CompanyId::new("1").expect("valid id")
    }

    #[tokio::test]
    async fn create_company_defaults_the_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/link/company/"))
            .and(header("authorization", "Bearer link-token"))
            .and(body_json(json!({ "id": "1", "name": "Company #1" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(company_json("1", "t1")))
            .expect(1)
            .mount(&server)
            .await;

        let company = adapter(&server)
            .create_company(&company_id(), None)
            .await
            .expect("company created");

        assert_eq!(company.name, "Company #1");
        assert_eq!(
            company.link_page,
            Some(crate::domain::CompanyLinkPage {
                url: None,
                enabled: false
            })
        );
    }

    #[tokio::test]
    async fn create_company_sends_explicit_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "id": "1", "name": "Acme" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(company_json("1", "t1")))
            .expect(1)
            .mount(&server)
            .await;

        adapter(&server)
            .create_company(&company_id(), Some("Acme".to_owned()))
            .await
            .expect("company created");
    }

    #[tokio::test]
    async fn missing_company_is_a_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/link/company/1/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
            .mount(&server)
            .await;

        let error = adapter(&server)
            .get_company(&company_id())
            .await
            .expect_err("not found");

        assert!(error.is_not_found(), "{error:?}");
    }

    #[tokio::test]
    async fn token_lookup_creates_unknown_companies_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/link/company/1/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/link/company/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(company_json("1", "new")))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = CompanyTokens::new(Arc::new(adapter(&server)));
        let token = tokens
            .get_company_token(&company_id())
            .await
            .expect("token");

        assert_eq!(token.token.expose(), "new");
    }

    #[tokio::test]
    async fn token_lookup_reuses_known_companies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/link/company/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(company_json("1", "known")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let tokens = CompanyTokens::new(Arc::new(adapter(&server)));
        let token = tokens
            .get_company_token(&company_id())
            .await
            .expect("token");

        assert_eq!(token.token.expose(), "known");
    }
}
