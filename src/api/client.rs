use anyhow::{Context, Result, bail};
use std::time::Duration;

use crate::config::ServerConfig;

const USER_AGENT: &str = "aqroute/0.1.0";

/// Blocking client for the air-quality web server
pub struct DataServer {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DataServer {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.base_url(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` relative to the server root and return the body
    pub(crate) fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            bail!("{} returned error status: {}", url, response.status());
        }

        response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
