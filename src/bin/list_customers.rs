//! Diagnostic CLI: logs in with credentials from the environment and prints
//! the customer list, exercising the full client stack against a live backend.

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;

use crm_client::forms::login::LoginForm;
use crm_client::gateway::http::HttpGateway;
use crm_client::models::config::ClientConfig;
use crm_client::services::collection::CustomerCollection;
use crm_client::services::session::SessionService;
use crm_client::store::{FileSessionStore, InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::open(path)),
        None => Arc::new(InMemorySessionStore::new()),
    };

    let gateway = match HttpGateway::from_config(&config, store.clone()) {
        Ok(gateway) => gateway,
        Err(err) => {
            log::error!("Error building gateway: {err}");
            std::process::exit(1);
        }
    };

    let form = LoginForm {
        username: env::var("CRM_USERNAME").unwrap_or_default(),
        password: env::var("CRM_PASSWORD").unwrap_or_default(),
    };

    let sessions = SessionService::new(store);
    let session = match sessions.login(&gateway, &form).await {
        Ok(session) => session,
        Err(err) => {
            log::error!("Login failed: {err}");
            std::process::exit(1);
        }
    };
    log::info!("Logged in as user {}", session.user_id);

    let mut collection = CustomerCollection::new();
    if let Err(err) = collection.load(&gateway, session.user_id).await {
        log::error!("Failed to load customers: {err}");
        std::process::exit(1);
    }

    println!("{} customer(s)", collection.canonical().len());
    for customer in collection.canonical() {
        println!(
            "#{} {} {} <{}> {}",
            customer.id, customer.first_name, customer.last_name, customer.email, customer.region
        );
    }
}
