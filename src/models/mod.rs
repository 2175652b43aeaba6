use serde::{Deserialize, Serialize};

/// A distinct manufacturer present in the inventory, with its listing count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Make {
    pub make: String,
    pub count: u32,
}

/// A distinct model of one make, with its listing count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    pub model: String,
    pub count: u32,
}

impl Make {
    pub fn new(make: impl Into<String>, count: u32) -> Self {
        Self {
            make: make.into(),
            count,
        }
    }
}

impl Model {
    pub fn new(model: impl Into<String>, count: u32) -> Self {
        Self {
            model: model.into(),
            count,
        }
    }
}

/// Core car listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: u32,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub fuel_type: String,
    pub kilometers: u32,
    pub details: String,
    pub price: u32,
    pub photo_url: String,
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub total_pages: u32,
}
