//! Orchestration layer tying forms, gateway and session state together.

use thiserror::Error;

use crate::forms::customer::Field;
use crate::gateway::errors::GatewayError;

pub mod collection;
pub mod form;
pub mod session;

/// Message shown when the backend rejects a duplicate email.
pub const EMAIL_CONFLICT_MESSAGE: &str =
    "This email is already registered. Please use a different email.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A mutating operation was attempted without an established session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Backend-reported uniqueness violation, mapped onto the same
    /// field-violation shape as local validation.
    #[error("{field}: {message}")]
    Conflict { field: Field, message: String },

    #[error("customer not found")]
    NotFound,

    #[error("transport failure: {0}")]
    Transport(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidCredentials => ServiceError::InvalidCredentials,
            GatewayError::Unauthorized => ServiceError::NotAuthenticated,
            GatewayError::Conflict(_) => ServiceError::Conflict {
                field: Field::Email,
                message: EMAIL_CONFLICT_MESSAGE.to_string(),
            },
            GatewayError::NotFound => ServiceError::NotFound,
            GatewayError::Timeout(reason)
            | GatewayError::Transport(reason)
            | GatewayError::Decode(reason) => ServiceError::Transport(reason),
        }
    }
}
