use crate::config::Config;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One HTTP connection pool shared by the model and grammar clients.
    pub http: reqwest::Client,
    pub config: Config,
    pub sessions: SessionStore,
}
