use crate::models::Model;
use crate::search::filter::{Choice, MAKE_KEY};
use crate::search::traits::ModelSource;
use crate::web::MODELS_PATH;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Fetches model lists from a running car-search server
pub struct HttpModelSource {
    client: Client,
    base_url: String,
}

impl HttpModelSource {
    /// Create a source talking to the server at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("car-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelSource for HttpModelSource {
    async fn fetch_models(&self, make: &Choice<String>) -> Result<Vec<Model>> {
        let url = format!("{}{}", self.base_url, MODELS_PATH);
        debug!("Fetching models for make {} from {}", make, url);

        let response = self
            .client
            .get(&url)
            .query(&[(MAKE_KEY, make.to_string())])
            .send()
            .await
            .context("Failed to request models")?;

        if !response.status().is_success() {
            warn!("Model endpoint returned status: {}", response.status());
            anyhow::bail!("Failed to fetch models: {}", response.status());
        }

        response
            .json::<Vec<Model>>()
            .await
            .context("Failed to decode model list")
    }
}
