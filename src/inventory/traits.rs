use crate::models::{CarPage, Make, Model};
use crate::search::filter::FilterState;
use anyhow::Result;
use async_trait::async_trait;

/// Read access to the car inventory backing the search pages
#[async_trait]
pub trait CarInventory: Send + Sync {
    /// Every distinct make with its listing count
    async fn get_makes(&self) -> Result<Vec<Make>>;

    /// Distinct models of `make`, or of all makes when `None`
    async fn get_models(&self, make: Option<&str>) -> Result<Vec<Model>>;

    /// The requested page of cars matching `filters`
    async fn get_cars(&self, filters: &FilterState, page_size: u32) -> Result<CarPage>;
}
