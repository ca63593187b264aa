//! Engine connection configuration.

/// Basic-auth credentials for the Kapacitor HTTP API.
///
/// Constructed once at process start and held by the client for the whole
/// run; nothing re-reads them per request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Connection settings for one Kapacitor engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the engine, e.g. `http://kapacitor:9092`.
    pub base_url: String,
    pub credentials: Credentials,
}

impl EngineConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }
}
