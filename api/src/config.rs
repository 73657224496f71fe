use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the hosted backend (REST under `/rest/v1`, auth under `/auth/v1`)
    pub backend_url: String,
    /// Project key sent with every backend request
    pub backend_api_key: String,
    pub port: u16,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("BACKEND_URL").context("BACKEND_URL must be set")?;
        let backend_api_key = env::var("BACKEND_API_KEY").context("BACKEND_API_KEY must be set")?;
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", raw))?,
            Err(_) => 8080,
        };
        let timeout_secs = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BACKEND_TIMEOUT_SECS is not a number: {}", raw))?,
            Err(_) => 10,
        };

        Ok(Self {
            backend_url,
            backend_api_key,
            port,
            backend_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
