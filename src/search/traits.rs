use crate::models::Model;
use crate::search::filter::Choice;
use anyhow::Result;
use async_trait::async_trait;

/// Where the model selector gets the model list for a make.
/// Implemented over HTTP by the client and directly by inventories in tests.
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// Models for `make`, or for every make when `make` is `All`
    async fn fetch_models(&self, make: &Choice<String>) -> Result<Vec<Model>>;
}
