use std::fmt;
use std::str::FromStr;

use crate::models::{Car, Model};
use crate::search::query::QueryParams;

/// Sentinel value meaning "no constraint on this field"
pub const ALL: &str = "all";

pub const MAKE_KEY: &str = "make";
pub const MODEL_KEY: &str = "model";
pub const MIN_PRICE_KEY: &str = "minPrice";
pub const MAX_PRICE_KEY: &str = "maxPrice";
pub const PAGE_KEY: &str = "page";

/// A filter field: either unconstrained or one concrete value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Choice<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: FromStr> Choice<T> {
    /// Empty, `"all"` and unparseable input all degrade to `All`
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL {
            return Choice::All;
        }
        raw.parse().map(Choice::Only).unwrap_or(Choice::All)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

/// Search filters as carried by the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub make: Choice<String>,
    pub model: Choice<String>,
    pub min_price: Choice<u32>,
    pub max_price: Choice<u32>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            make: Choice::All,
            model: Choice::All,
            min_price: Choice::All,
            max_price: Choice::All,
            page: 1,
        }
    }
}

/// A single transition of the filter state
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetMake(Choice<String>),
    SetModel(Choice<String>),
    SetMinPrice(Choice<u32>),
    SetMaxPrice(Choice<u32>),
    SetPage(u32),
    /// The model list for the current make arrived
    ModelsLoaded(Vec<Model>),
}

/// Parse the `page` parameter; missing or non-positive values mean page 1
pub fn parse_page(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => page,
        _ => 1,
    }
}

impl FilterState {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            make: Choice::parse(&query.get_str(MAKE_KEY)),
            model: Choice::parse(&query.get_str(MODEL_KEY)),
            min_price: Choice::parse(&query.get_str(MIN_PRICE_KEY)),
            max_price: Choice::parse(&query.get_str(MAX_PRICE_KEY)),
            page: parse_page(&query.get_str(PAGE_KEY)),
        }
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set(MAKE_KEY, self.make.to_string());
        query.set(MODEL_KEY, self.model.to_string());
        query.set(MIN_PRICE_KEY, self.min_price.to_string());
        query.set(MAX_PRICE_KEY, self.max_price.to_string());
        query.set(PAGE_KEY, self.page.to_string());
        query
    }

    pub fn matches(&self, car: &Car) -> bool {
        let make_match = self.make.as_option().map_or(true, |m| *m == car.make);
        let model_match = self.model.as_option().map_or(true, |m| *m == car.model);
        let min_match = self.min_price.as_option().map_or(true, |&p| car.price >= p);
        let max_match = self.max_price.as_option().map_or(true, |&p| car.price <= p);
        make_match && model_match && min_match && max_match
    }
}

/// Apply one action to the filter state.
///
/// Pure: the caller owns the state and decides when the URL is rewritten.
pub fn reduce(state: FilterState, action: FilterAction) -> FilterState {
    match action {
        FilterAction::SetMake(make) => FilterState { make, ..state },
        FilterAction::SetModel(model) => FilterState { model, ..state },
        FilterAction::SetMinPrice(min_price) => FilterState { min_price, ..state },
        FilterAction::SetMaxPrice(max_price) => FilterState { max_price, ..state },
        FilterAction::SetPage(page) => FilterState {
            page: page.max(1),
            ..state
        },
        FilterAction::ModelsLoaded(models) => {
            let still_valid = match &state.model {
                Choice::All => true,
                Choice::Only(selected) => models.iter().any(|m| &m.model == selected),
            };
            if still_valid {
                state
            } else {
                FilterState {
                    model: Choice::All,
                    ..state
                }
            }
        }
    }
}
