//! Car search: a filter form over a car inventory with query-string driven
//! state, a dependent model list and paginated results.

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod search;
pub mod web;
