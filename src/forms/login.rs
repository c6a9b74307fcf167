use serde::Deserialize;
use validator::Validate;

use crate::domain::session::LoginCredentials;

/// Login form input. Both fields are required; everything else is up to the
/// authentication backend.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<&LoginForm> for LoginCredentials {
    fn from(form: &LoginForm) -> Self {
        Self {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        }
    }
}
