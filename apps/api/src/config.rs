use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` talks to a local Ollama.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_host: String,
    pub ollama_model: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_host: env_or("OLLAMA_HOST", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            llm_timeout: Duration::from_secs(
                env_or("LLM_TIMEOUT_SECS", "300")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: env_or("PORT", "8501")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            ollama_host: "http://localhost:11434".to_string(),
            ollama_model: DEFAULT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(1),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
