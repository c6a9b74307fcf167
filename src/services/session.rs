//! Login/logout lifecycle over the injected session store.

use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use validator::Validate;

use crate::domain::session::{AuthToken, Session};
use crate::domain::types::UserId;
use crate::dto::api::TokenClaims;
use crate::forms::login::LoginForm;
use crate::gateway::AuthGateway;
use crate::services::{ServiceError, ServiceResult};
use crate::store::{SessionStore, TOKEN_KEY, USER_ID_KEY};

/// Extract the user id from a login token without verifying the signature —
/// the token is the backend's to validate; the client only reads the claim.
pub fn decode_user_id(token: &str) -> ServiceResult<UserId> {
    let header = decode_header(token)
        .map_err(|e| ServiceError::Transport(format!("malformed login token: {e}")))?;
    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ServiceError::Transport(format!("malformed login token: {e}")))?;
    UserId::new(data.claims.user_id)
        .map_err(|e| ServiceError::Transport(format!("invalid user id claim: {e}")))
}

/// Owns the `{token, userId}` pair in the store. Constructed once per process
/// and shared by reference with whatever needs the current identity.
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Authenticate and persist the session. Nothing is written unless both
    /// the login call and the token decode succeed.
    pub async fn login<A>(&self, gateway: &A, form: &LoginForm) -> ServiceResult<Session>
    where
        A: AuthGateway + ?Sized,
    {
        if form.validate().is_err() {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = gateway.login(&form.into()).await.map_err(|e| {
            log::error!("Login failed: {e}");
            ServiceError::from(e)
        })?;
        let user_id = decode_user_id(token.as_str())?;

        self.store.set(TOKEN_KEY, token.as_str());
        self.store.set(USER_ID_KEY, &user_id.to_string());

        Ok(Session { token, user_id })
    }

    /// Clears both keys unconditionally; never touches the network.
    pub fn logout(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_ID_KEY);
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.store.get(TOKEN_KEY).map(AuthToken::new)
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.store
            .get(USER_ID_KEY)?
            .parse::<i32>()
            .ok()
            .and_then(|raw| UserId::new(raw).ok())
    }

    pub fn current(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user_id: self.current_user_id()?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }
}
