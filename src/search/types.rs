use serde::{Deserialize, Serialize};

use crate::search::query::QueryParams;

/// Path of the search results page
pub const SEARCH_PATH: &str = "/cars";

/// One entry of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Visible label
    pub label: String,
    /// Whether this entry is the current value of the control
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// A client-side URL change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub pathname: String,
    pub query: QueryParams,
    /// Update the URL without a full page reload
    pub shallow: bool,
}

impl Navigation {
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, self.query.to_query_string())
        }
    }
}

/// Arrangement of the search form's controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    SingleColumn,
    #[default]
    TwoColumn,
}

impl Layout {
    pub fn from_single_column(single_column: bool) -> Self {
        if single_column {
            Layout::SingleColumn
        } else {
            Layout::TwoColumn
        }
    }
}
