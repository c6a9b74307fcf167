#![allow(dead_code)]

//! Shared in-memory backend double used by the integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use crm_client::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crm_client::domain::session::{AuthToken, LoginCredentials};
use crm_client::domain::types::{CustomerId, UserId};
use crm_client::gateway::errors::{GatewayError, GatewayResult};
use crm_client::gateway::{AuthGateway, CustomerFilter, CustomerGateway};

pub const USERNAME: &str = "tester";
pub const PASSWORD: &str = "hunter2";

#[derive(Serialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: i32,
}

/// Produce a decodable HS256 token carrying the `userId` claim.
pub fn mint_token(user_id: UserId) -> String {
    encode(
        &Header::default(),
        &Claims {
            user_id: user_id.get(),
        },
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token encodes")
}

/// In-memory stand-in for the REST backend: uniqueness on email, ids handed
/// out sequentially, optional one-shot failure injection.
pub struct FakeBackend {
    user_id: UserId,
    customers: Mutex<Vec<Customer>>,
    next_id: Mutex<i32>,
    fail_next: Mutex<Option<GatewayError>>,
    token_override: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            customers: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_next: Mutex::new(None),
            token_override: Mutex::new(None),
        }
    }

    /// Insert a record directly, bypassing the gateway surface.
    pub fn seed(&self, first: &str, last: &str, email: &str, region: &str) -> Customer {
        let mut next_id = self.next_id.lock().expect("lock poisoned");
        let customer = Customer {
            id: CustomerId::new(*next_id).expect("valid id"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            region: region.to_string(),
            owner: self.user_id,
        };
        *next_id += 1;
        self.customers
            .lock()
            .expect("lock poisoned")
            .push(customer.clone());
        customer
    }

    /// Make the next gateway call fail with `error`.
    pub fn fail_next(&self, error: GatewayError) {
        *self.fail_next.lock().expect("lock poisoned") = Some(error);
    }

    /// Make the next login hand out `token` instead of a minted one.
    pub fn override_token(&self, token: &str) {
        *self.token_override.lock().expect("lock poisoned") = Some(token.to_string());
    }

    pub fn stored_len(&self) -> usize {
        self.customers.lock().expect("lock poisoned").len()
    }

    fn take_failure(&self) -> Option<GatewayError> {
        self.fail_next.lock().expect("lock poisoned").take()
    }
}

#[async_trait]
impl AuthGateway for FakeBackend {
    async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthToken> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        if credentials.username != USERNAME || credentials.password != PASSWORD {
            return Err(GatewayError::InvalidCredentials);
        }
        if let Some(token) = self.token_override.lock().expect("lock poisoned").take() {
            return Ok(AuthToken::new(token));
        }
        Ok(AuthToken::new(mint_token(self.user_id)))
    }
}

#[async_trait]
impl CustomerGateway for FakeBackend {
    async fn list_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Customer>> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(self
            .customers
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|c| c.owner == user_id)
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &CustomerFilter) -> GatewayResult<Vec<Customer>> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(self
            .customers
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create(&self, new_customer: &NewCustomer) -> GatewayResult<Customer> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut customers = self.customers.lock().expect("lock poisoned");
        if customers
            .iter()
            .any(|c| c.email.eq_ignore_ascii_case(&new_customer.email))
        {
            return Err(GatewayError::Conflict("duplicate email".to_string()));
        }
        let mut next_id = self.next_id.lock().expect("lock poisoned");
        let customer = Customer {
            id: CustomerId::new(*next_id).expect("valid id"),
            first_name: new_customer.first_name.clone(),
            last_name: new_customer.last_name.clone(),
            email: new_customer.email.clone(),
            region: new_customer.region.clone(),
            owner: new_customer.owner,
        };
        *next_id += 1;
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: CustomerId, updates: &UpdateCustomer) -> GatewayResult<Customer> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut customers = self.customers.lock().expect("lock poisoned");
        if customers
            .iter()
            .any(|c| c.id != id && c.email.eq_ignore_ascii_case(&updates.email))
        {
            return Err(GatewayError::Conflict("duplicate email".to_string()));
        }
        let Some(entry) = customers.iter_mut().find(|c| c.id == id) else {
            return Err(GatewayError::NotFound);
        };
        entry.first_name = updates.first_name.clone();
        entry.last_name = updates.last_name.clone();
        entry.email = updates.email.clone();
        entry.region = updates.region.clone();
        Ok(entry.clone())
    }

    async fn delete(&self, id: CustomerId) -> GatewayResult<()> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut customers = self.customers.lock().expect("lock poisoned");
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }
}
