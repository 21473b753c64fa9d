use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. The compliance engine is stateless, so only configuration
/// travels here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
