use thiserror::Error;

/// Failures reported by the remote gateway, one variant per backend failure
/// class the client reacts to differently.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authorized")]
    Unauthorized,

    /// Uniqueness violation (duplicate email), HTTP 409.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("entity not found")]
    NotFound,

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded into domain types.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
