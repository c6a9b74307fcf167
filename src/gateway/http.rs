//! Reqwest-backed gateway adapter.
//!
//! Owns transport details only: endpoint layout, bearer-token injection,
//! HTTP error mapping and JSON decoding into domain types.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::session::{AuthToken, LoginCredentials};
use crate::domain::types::{CustomerId, UserId};
use crate::dto::api::{CustomerDto, LoginRequest};
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::{AuthGateway, CustomerFilter, CustomerGateway};
use crate::models::config::ClientConfig;
use crate::store::{SessionStore, TOKEN_KEY};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway implementation speaking to the CRM REST backend.
///
/// The session store is consulted on every request so a token persisted by a
/// login is picked up without rebuilding the gateway.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
}

impl HttpGateway {
    /// Build a gateway with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    /// Build a gateway from loaded configuration.
    pub fn from_config(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| GatewayError::Transport(format!("invalid api base url: {e}")))?;
        let timeout = config
            .request_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Self::new(base_url, timeout, store)
            .map_err(|e| GatewayError::Transport(format!("failed to build http client: {e}")))
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    /// Attach the persisted bearer token, when present.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get(TOKEN_KEY) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> GatewayResult<Vec<u8>> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    fn decode_customer(body: &[u8]) -> GatewayResult<Customer> {
        let dto: CustomerDto = serde_json::from_slice(body)
            .map_err(|e| GatewayError::Decode(format!("invalid customer payload: {e}")))?;
        Customer::try_from(dto)
            .map_err(|e| GatewayError::Decode(format!("invalid customer record: {e}")))
    }

    fn decode_customers(body: &[u8]) -> GatewayResult<Vec<Customer>> {
        let dtos: Vec<CustomerDto> = serde_json::from_slice(body)
            .map_err(|e| GatewayError::Decode(format!("invalid customer list payload: {e}")))?;
        dtos.into_iter()
            .map(|dto| {
                Customer::try_from(dto)
                    .map_err(|e| GatewayError::Decode(format!("invalid customer record: {e}")))
            })
            .collect()
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthToken> {
        let url = self.endpoint("user/login")?;
        let request = self.client.post(url).json(&LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        });
        let body = self.execute(request).await.map_err(|e| match e {
            // A rejected login is invalid credentials, not a plumbing fault.
            GatewayError::Unauthorized => GatewayError::InvalidCredentials,
            other => other,
        })?;
        let token = decode_token_body(&body)?;
        Ok(AuthToken::new(token))
    }
}

#[async_trait]
impl CustomerGateway for HttpGateway {
    async fn list_for_user(&self, _user_id: UserId) -> GatewayResult<Vec<Customer>> {
        // The backend scopes this endpoint by the bearer token, not a param.
        let url = self.endpoint("customer/loggedIn")?;
        let body = self.execute(self.authorize(self.client.get(url))).await?;
        Self::decode_customers(&body)
    }

    async fn filter(&self, filter: &CustomerFilter) -> GatewayResult<Vec<Customer>> {
        let url = self.endpoint("customer/filter")?;
        let request = self
            .authorize(self.client.get(url))
            .query(&filter_params(filter));
        let body = self.execute(request).await?;
        Self::decode_customers(&body)
    }

    async fn create(&self, new_customer: &NewCustomer) -> GatewayResult<Customer> {
        let url = self.endpoint("customer/create")?;
        let request = self.authorize(self.client.post(url)).json(new_customer);
        let body = self.execute(request).await?;
        Self::decode_customer(&body)
    }

    async fn update(&self, id: CustomerId, updates: &UpdateCustomer) -> GatewayResult<Customer> {
        let url = self.endpoint(&format!("customer/{id}"))?;
        let request = self.authorize(self.client.put(url)).json(updates);
        let body = self.execute(request).await?;
        Self::decode_customer(&body)
    }

    async fn delete(&self, id: CustomerId) -> GatewayResult<()> {
        let url = self.endpoint(&format!("customer/{id}"))?;
        self.execute(self.authorize(self.client.delete(url)))
            .await?;
        Ok(())
    }
}

/// Query parameters for the filter endpoint; blank fields are omitted.
fn filter_params(filter: &CustomerFilter) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(first_name) = &filter.first_name {
        params.push(("firstName", first_name.clone()));
    }
    if let Some(email) = &filter.email {
        params.push(("email", email.clone()));
    }
    if let Some(region) = &filter.region {
        params.push(("region", region.clone()));
    }
    params
}

/// The backend returns the token as a bare string; tolerate a JSON-quoted one.
fn decode_token_body(body: &[u8]) -> GatewayResult<String> {
    if let Ok(token) = serde_json::from_slice::<String>(body) {
        return Ok(token);
    }
    let token = String::from_utf8_lossy(body).trim().to_string();
    if token.is_empty() {
        return Err(GatewayError::Decode("empty login response".to_string()));
    }
    Ok(token)
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(error.to_string())
    } else {
        GatewayError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        StatusCode::CONFLICT => GatewayError::Conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout(message),
        _ => GatewayError::Transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_http_statuses_to_gateway_errors() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, b""),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, b""),
            GatewayError::NotFound
        ));
        assert!(matches!(
            map_status_error(StatusCode::CONFLICT, b"duplicate email"),
            GatewayError::Conflict(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::GATEWAY_TIMEOUT, b""),
            GatewayError::Timeout(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::INTERNAL_SERVER_ERROR, b"boom"),
            GatewayError::Transport(_)
        ));
    }

    #[test]
    fn filter_params_skip_unset_fields() {
        let filter = CustomerFilter::new().first_name("Ada").region("");
        let params = filter_params(&filter);
        assert_eq!(params, vec![("firstName", "Ada".to_string())]);
    }

    #[test]
    fn token_body_accepts_bare_and_quoted_strings() {
        assert_eq!(decode_token_body(b"abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(decode_token_body(b"\"abc.def.ghi\"").unwrap(), "abc.def.ghi");
        assert!(decode_token_body(b"  ").is_err());
    }

    #[test]
    fn customer_payload_decodes_into_domain() {
        let body = br#"{
            "id": 3,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@numbers.org",
            "region": "London",
            "userId": 9
        }"#;
        let customer = HttpGateway::decode_customer(body).expect("payload should decode");
        assert_eq!(customer.id.get(), 3);
        assert_eq!(customer.owner.get(), 9);
        assert_eq!(customer.first_name, "Ada");
    }

    #[test]
    fn rejects_customer_payload_with_bad_id() {
        let body = br#"{
            "id": 0,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@numbers.org",
            "region": "London",
            "userId": 9
        }"#;
        assert!(matches!(
            HttpGateway::decode_customer(body),
            Err(GatewayError::Decode(_))
        ));
    }
}
