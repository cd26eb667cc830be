use anyhow::{bail, Context, Result};

use crate::theme::ThemeMode;

/// Application configuration loaded from environment variables.
/// Required variables abort startup when missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the CVV service, e.g. `https://api.example.com`.
    pub api_url: String,
    /// Theme used when no stored preference exists yet.
    pub default_theme: ThemeMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_theme = match std::env::var("THEME").as_deref() {
            Ok("light") | Err(_) => ThemeMode::Light,
            Ok("dark") => ThemeMode::Dark,
            Ok(other) => bail!("THEME must be 'light' or 'dark', got '{other}'"),
        };

        Ok(Config {
            api_url: require_env("API_URL")?,
            default_theme,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
