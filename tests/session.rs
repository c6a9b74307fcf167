use crm_client::domain::types::UserId;
use crm_client::forms::login::LoginForm;
use crm_client::services::ServiceError;
use crm_client::services::collection::CustomerCollection;
use crm_client::services::session::{SessionService, decode_user_id};
use crm_client::store::{InMemorySessionStore, SessionStore, TOKEN_KEY, USER_ID_KEY};

mod common;

use common::{FakeBackend, PASSWORD, USERNAME, mint_token};

fn user() -> UserId {
    UserId::new(42).unwrap()
}

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn decodes_the_user_id_claim() {
    let token = mint_token(user());
    assert_eq!(decode_user_id(&token).unwrap(), user());
}

#[test]
fn rejects_garbage_tokens() {
    assert!(matches!(
        decode_user_id("not-a-jwt"),
        Err(ServiceError::Transport(_))
    ));
}

#[tokio::test]
async fn login_persists_token_and_user_id() {
    let backend = FakeBackend::new(user());
    let sessions = SessionService::new(InMemorySessionStore::new());

    let session = sessions
        .login(&backend, &login_form(USERNAME, PASSWORD))
        .await
        .expect("login");
    assert_eq!(session.user_id, user());
    assert_eq!(sessions.current_user_id(), Some(user()));
    assert!(sessions.is_authenticated());
    assert_eq!(sessions.token().map(|t| t.into_inner()), Some(session.token.into_inner()));
}

#[tokio::test]
async fn rejected_login_persists_nothing() {
    let backend = FakeBackend::new(user());
    let store = InMemorySessionStore::new();
    let sessions = SessionService::new(store);

    let err = sessions
        .login(&backend, &login_form(USERNAME, "wrong"))
        .await
        .expect_err("bad password");
    assert!(matches!(err, ServiceError::InvalidCredentials));
    assert_eq!(sessions.current_user_id(), None);
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn blank_credentials_are_rejected_locally() {
    let backend = FakeBackend::new(user());
    let sessions = SessionService::new(InMemorySessionStore::new());

    let err = sessions
        .login(&backend, &login_form("", ""))
        .await
        .expect_err("blank credentials");
    assert!(matches!(err, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn malformed_token_from_backend_persists_nothing() {
    let backend = FakeBackend::new(user());
    backend.override_token("garbage");
    let sessions = SessionService::new(InMemorySessionStore::new());

    let err = sessions
        .login(&backend, &login_form(USERNAME, PASSWORD))
        .await
        .expect_err("bad token");
    assert!(matches!(err, ServiceError::Transport(_)));
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn logout_clears_both_keys_unconditionally() {
    let backend = FakeBackend::new(user());
    let store = std::sync::Arc::new(InMemorySessionStore::new());
    let sessions = SessionService::new(store.clone());

    sessions
        .login(&backend, &login_form(USERNAME, PASSWORD))
        .await
        .expect("login");
    assert!(store.get(TOKEN_KEY).is_some());
    assert!(store.get(USER_ID_KEY).is_some());

    sessions.logout();
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(USER_ID_KEY), None);

    // A second logout with nothing stored is still fine.
    sessions.logout();
    assert!(!sessions.is_authenticated());
}

/// Full scenario: login, load, free-text search, clear.
#[tokio::test]
async fn login_load_search_and_clear_round_trip() {
    let backend = FakeBackend::new(user());
    backend.seed("Alice", "Martin", "alice@corp.com", "Paris");
    backend.seed("Bob", "Stone", "bob@paris-tours.fr", "Berlin");
    backend.seed("Clara", "Reyes", "clara@corp.com", "Madrid");

    let sessions = SessionService::new(InMemorySessionStore::new());
    let session = sessions
        .login(&backend, &login_form(USERNAME, PASSWORD))
        .await
        .expect("login");

    let mut collection = CustomerCollection::new();
    collection
        .load(&backend, session.user_id)
        .await
        .expect("load");
    assert_eq!(collection.canonical().len(), 3);

    collection.search("paris");
    let names: Vec<_> = collection.view().iter().map(|c| c.first_name.as_str()).collect();
    // Alice matches on region, Bob on email; matching is case-insensitive.
    assert_eq!(names, ["Alice", "Bob"]);

    collection
        .clear_filters(&backend, session.user_id)
        .await
        .expect("clear");
    assert_eq!(collection.view().len(), 3);
}
