use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Opaque bearer token issued by the authentication endpoint.
///
/// The client never inspects it beyond the one-off claim decode at login.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for AuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An established session: the token plus the user id decoded from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: AuthToken,
    pub user_id: UserId,
}

/// Username/password pair sent to the authentication endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}
