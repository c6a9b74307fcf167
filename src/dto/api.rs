//! Wire payloads exchanged with the REST backend.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::types::{CustomerId, TypeConstraintError, UserId};

/// Body of `POST user/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Customer record as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    pub user_id: i32,
}

impl TryFrom<CustomerDto> for Customer {
    type Error = TypeConstraintError;

    /// Validate backend identifiers at the boundary; everything after this
    /// conversion can trust them.
    fn try_from(dto: CustomerDto) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId::new(dto.id)?,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            region: dto.region,
            owner: UserId::new(dto.user_id)?,
        })
    }
}

/// Claims the client reads out of the login token. The token is otherwise
/// opaque; no signature or expiry checks happen client-side.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: i32,
}
