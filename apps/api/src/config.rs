use anyhow::{Context, Result};

const DEFAULT_LANGUAGETOOL_URL: &str = "https://api.languagetool.org/v2/check";

/// Application configuration loaded from environment variables.
/// Sessions normally supply their own model API key at creation time,
/// so `GEMINI_API_KEY` is only a server-side fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub languagetool_url: String,
    pub gemini_api_key: Option<String>,
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
            languagetool_url: std::env::var("LANGUAGETOOL_URL")
                .unwrap_or_else(|_| DEFAULT_LANGUAGETOOL_URL.to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        })
    }
}
