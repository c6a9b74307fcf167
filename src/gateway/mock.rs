//! Mock gateway implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::session::{AuthToken, LoginCredentials};
use crate::domain::types::{CustomerId, UserId};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{AuthGateway, CustomerFilter, CustomerGateway};

mock! {
    pub Gateway {}

    #[async_trait]
    impl AuthGateway for Gateway {
        async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthToken>;
    }

    #[async_trait]
    impl CustomerGateway for Gateway {
        async fn list_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Customer>>;
        async fn filter(&self, filter: &CustomerFilter) -> GatewayResult<Vec<Customer>>;
        async fn create(&self, new_customer: &NewCustomer) -> GatewayResult<Customer>;
        async fn update(&self, id: CustomerId, updates: &UpdateCustomer) -> GatewayResult<Customer>;
        async fn delete(&self, id: CustomerId) -> GatewayResult<()>;
    }
}
