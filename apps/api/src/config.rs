use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a sensible default; nothing is required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Service-wide default for the JD mirroring threshold. Requests may
    /// override it per call; the engine always receives it as an argument.
    pub jd_mirroring_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jd_mirroring_threshold: std::env::var("JD_MIRRORING_THRESHOLD")
                .unwrap_or_else(|_| "0.75".to_string())
                .parse::<f64>()
                .context("JD_MIRRORING_THRESHOLD must be a number in [0, 1]")?,
        })
    }
}
