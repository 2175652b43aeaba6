use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::inventory::traits::CarInventory;
use crate::models::{Car, CarPage, Make, Model};
use crate::search::filter::{Choice, FilterState};
use crate::search::traits::ModelSource;

const BUNDLED_CARS: &str = include_str!("../../data/cars.json");

/// Inventory held in memory, loaded once from JSON
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    cars: Vec<Car>,
}

impl InMemoryInventory {
    pub fn new(cars: Vec<Car>) -> Self {
        Self { cars }
    }

    /// Inventory shipped with the crate
    pub fn bundled() -> Result<Self> {
        let cars: Vec<Car> =
            serde_json::from_str(BUNDLED_CARS).context("Failed to parse bundled car data")?;
        Ok(Self::new(cars))
    }

    /// Load a JSON array of cars from `path`
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read car data from {}", path.display()))?;
        let cars: Vec<Car> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse car data in {}", path.display()))?;

        info!("Loaded {} cars from {}", cars.len(), path.display());
        Ok(Self::new(cars))
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

/// Count occurrences of each key, sorted by key
fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, u32> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

#[async_trait]
impl CarInventory for InMemoryInventory {
    async fn get_makes(&self) -> Result<Vec<Make>> {
        let makes = count_by(self.cars.iter().map(|car| car.make.as_str()))
            .into_iter()
            .map(|(make, count)| Make::new(make, count))
            .collect();
        Ok(makes)
    }

    async fn get_models(&self, make: Option<&str>) -> Result<Vec<Model>> {
        let cars = self
            .cars
            .iter()
            .filter(|car| make.map_or(true, |make| car.make == make));

        let models = count_by(cars.map(|car| car.model.as_str()))
            .into_iter()
            .map(|(model, count)| Model::new(model, count))
            .collect();
        Ok(models)
    }

    async fn get_cars(&self, filters: &FilterState, page_size: u32) -> Result<CarPage> {
        let page_size = page_size.max(1) as usize;
        let matching: Vec<&Car> = self.cars.iter().filter(|car| filters.matches(car)).collect();
        let total_pages = matching.len().div_ceil(page_size) as u32;

        let offset = (filters.page.max(1) as usize - 1).saturating_mul(page_size);
        let cars: Vec<Car> = matching
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        debug!(
            "Page {} of {} holds {} cars",
            filters.page,
            total_pages,
            cars.len()
        );

        Ok(CarPage { cars, total_pages })
    }
}

#[async_trait]
impl ModelSource for InMemoryInventory {
    async fn fetch_models(&self, make: &Choice<String>) -> Result<Vec<Model>> {
        self.get_models(make.as_option().map(String::as_str)).await
    }
}
