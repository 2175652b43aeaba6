use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use tracing::info;

use crate::config::Config;
use crate::inventory::{CarInventory, InMemoryInventory};

pub struct AppState {
    pub config: Config,
    pub inventory: Arc<dyn CarInventory>,
}

impl AppState {
    pub fn new(config: Config, inventory: Arc<dyn CarInventory>) -> Arc<Self> {
        Arc::new(Self { config, inventory })
    }

    /// Build state from config, loading the inventory it points at
    pub async fn load(config: Config) -> Result<Arc<Self>> {
        let inventory = match &config.data_path {
            Some(path) => InMemoryInventory::load(path).await?,
            None => {
                info!("No inventory file configured, using bundled cars");
                InMemoryInventory::bundled()?
            }
        };

        Ok(Self::new(config, Arc::new(inventory)))
    }

    pub fn models_window(&self) -> Duration {
        Duration::seconds(i64::from(self.config.models_ttl_secs))
    }
}
