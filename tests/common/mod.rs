use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use car_search::config::Config;
use car_search::inventory::{CarInventory, InMemoryInventory};
use car_search::models::{Car, CarPage, Make, Model};
use car_search::search::FilterState;
use car_search::web::{self, AppState};

/// Inventory wrapper counting model-list lookups
pub struct CountingInventory {
    inner: InMemoryInventory,
    model_calls: AtomicUsize,
}

impl CountingInventory {
    pub fn new(inner: InMemoryInventory) -> Arc<Self> {
        Arc::new(Self {
            inner,
            model_calls: AtomicUsize::new(0),
        })
    }

    pub fn model_calls(&self) -> usize {
        self.model_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CarInventory for CountingInventory {
    async fn get_makes(&self) -> Result<Vec<Make>> {
        self.inner.get_makes().await
    }

    async fn get_models(&self, make: Option<&str>) -> Result<Vec<Model>> {
        self.model_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_models(make).await
    }

    async fn get_cars(&self, filters: &FilterState, page_size: u32) -> Result<CarPage> {
        self.inner.get_cars(filters, page_size).await
    }
}

pub fn car(id: u32, make: &str, model: &str, price: u32) -> Car {
    Car {
        id,
        make: make.to_string(),
        model: model.to_string(),
        year: 2017,
        fuel_type: "Petrol".to_string(),
        kilometers: 60_000,
        details: format!("{make} {model} in good condition"),
        price,
        photo_url: String::new(),
    }
}

pub fn inventory() -> InMemoryInventory {
    InMemoryInventory::new(vec![
        car(1, "Toyota", "Corolla", 4800),
        car(2, "Toyota", "Camry", 14200),
        car(3, "Toyota", "Corolla", 16500),
        car(4, "Honda", "Civic", 9800),
        car(5, "Honda", "Jazz", 11200),
        car(6, "Honda", "Civic", 2900),
        car(7, "Toyota", "Supra", 45000),
    ])
}

/// Bind to port 0 and return the base URL
pub async fn start_server(inventory: Arc<dyn CarInventory>) -> String {
    let config = Config {
        page_size: 2,
        ..Config::default()
    };
    let app = web::router(AppState::new(config, inventory));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
