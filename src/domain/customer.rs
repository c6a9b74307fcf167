use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, UserId};

/// A customer record as returned by the backend.
///
/// `id` and `owner` are assigned server-side and immutable; the remaining
/// fields are whatever the owning user last submitted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    #[serde(rename = "userId")]
    pub owner: UserId,
}

/// Payload for creating a customer. `owner` is filled in from the session at
/// submission time, never from user input.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    #[serde(rename = "userId")]
    pub owner: UserId,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        region: String,
        owner: UserId,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            region: region.trim().to_string(),
            owner,
        }
    }
}

/// Payload for updating an existing customer by id.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    #[serde(rename = "userId")]
    pub owner: UserId,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        region: String,
        owner: UserId,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            region: region.trim().to_string(),
            owner,
        }
    }
}
