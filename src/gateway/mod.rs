//! Ports to the remote CRM backend.
//!
//! The traits describe the six endpoints the client consumes at a semantic
//! level; `http` provides the reqwest implementation and `mock` the
//! mockall doubles used by service tests.

use async_trait::async_trait;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::session::{AuthToken, LoginCredentials};
use crate::domain::types::{CustomerId, UserId};
use crate::gateway::errors::GatewayResult;

pub mod errors;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Server-side filter over customer fields; only set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub region: Option<String>,
}

impl CustomerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = some_non_empty(first_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = some_non_empty(email.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = some_non_empty(region.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.email.is_none() && self.region.is_none()
    }

    /// Local equivalent of the server predicate: case-insensitive substring
    /// match on every set field. Used to re-derive the view after mutations.
    pub fn matches(&self, customer: &Customer) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        self.first_name
            .as_deref()
            .is_none_or(|n| contains(&customer.first_name, n))
            && self.email.as_deref().is_none_or(|n| contains(&customer.email, n))
            && self
                .region
                .as_deref()
                .is_none_or(|n| contains(&customer.region, n))
    }
}

fn some_non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Authentication endpoint.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthToken>;
}

/// Customer CRUD endpoints, scoped to the authenticated user by the backend.
#[async_trait]
pub trait CustomerGateway: Send + Sync {
    async fn list_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Customer>>;
    async fn filter(&self, filter: &CustomerFilter) -> GatewayResult<Vec<Customer>>;
    async fn create(&self, new_customer: &NewCustomer) -> GatewayResult<Customer>;
    async fn update(&self, id: CustomerId, updates: &UpdateCustomer) -> GatewayResult<Customer>;
    async fn delete(&self, id: CustomerId) -> GatewayResult<()>;
}
