//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for reaching the CRM backend.
pub struct ClientConfig {
    /// Base URL of the REST backend, e.g. `https://crm.example.com/api/`.
    pub api_base_url: String,
    /// Per-request timeout; a built-in default applies when unset.
    pub request_timeout_secs: Option<u64>,
    /// Path of the session file; unset means sessions stay in memory.
    pub session_file: Option<String>,
}

impl ClientConfig {
    /// Load from `config/default.yaml`, an optional `config/<APP_ENV>.yaml`
    /// overlay and `APP_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
