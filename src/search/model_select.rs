use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::models::Model;
use crate::search::cache::{is_fresh, ResponseCache};
use crate::search::filter::{reduce, Choice, FilterAction, FilterState, ALL};
use crate::search::traits::ModelSource;
use crate::search::types::SelectOption;

/// Outcome of changing the selected make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MakeChange {
    /// A fresh cached list was applied, no request needed
    Cached,
    /// A request for this make is already running
    InFlight,
    /// The caller must fetch the list and hand it back via `resolve`
    Fetch(FetchTicket),
}

/// A pending model-list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    make: Choice<String>,
}

impl FetchTicket {
    pub fn make(&self) -> &Choice<String> {
        &self.make
    }
}

/// The model select of the search form, whose options depend on the make.
///
/// Owns the form values so the model correction can be applied when a new
/// list arrives. Responses are cached per make for the cache window; a
/// response for a make that is no longer selected is cached but not applied.
/// A request that has not resolved within the window counts as abandoned.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    values: FilterState,
    initial_models: Vec<Model>,
    cache: ResponseCache<String, Vec<Model>>,
    in_flight: HashMap<String, DateTime<Utc>>,
}

impl ModelSelector {
    pub fn new(values: FilterState, initial_models: Vec<Model>, window: Duration) -> Self {
        Self {
            values,
            initial_models,
            cache: ResponseCache::new(window),
            in_flight: HashMap::new(),
        }
    }

    pub fn values(&self) -> &FilterState {
        &self.values
    }

    pub fn current_make(&self) -> &Choice<String> {
        &self.values.make
    }

    pub fn selected_model(&self) -> &Choice<String> {
        &self.values.model
    }

    /// Apply a form edit that does not involve the model list
    pub fn dispatch(&mut self, action: FilterAction) {
        self.values = reduce(self.values.clone(), action);
    }

    pub fn change_make(&mut self, make: Choice<String>, now: DateTime<Utc>) -> MakeChange {
        self.dispatch(FilterAction::SetMake(make.clone()));
        let key = make.to_string();

        if let Some(models) = self.cache.get_fresh(&key, now).cloned() {
            debug!("Reusing cached models for make {}", key);
            self.dispatch(FilterAction::ModelsLoaded(models));
            return MakeChange::Cached;
        }

        if let Some(&requested_at) = self.in_flight.get(&key) {
            if is_fresh(now, requested_at, self.cache.window()) {
                debug!("Models for make {} already requested", key);
                return MakeChange::InFlight;
            }
            warn!("Request for models of make {} never resolved, retrying", key);
        }
        self.in_flight.insert(key, now);

        MakeChange::Fetch(FetchTicket { make })
    }

    /// Hand back the result of a fetch; returns whether the list was applied
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Model>>,
        now: DateTime<Utc>,
    ) -> bool {
        let key = ticket.make.to_string();
        self.in_flight.remove(&key);

        let models = match result {
            Ok(models) => models,
            Err(e) => {
                warn!("Failed to fetch models for make {}: {:#}", key, e);
                return false;
            }
        };

        debug!("Received {} models for make {}", models.len(), key);
        self.cache.insert(key.clone(), models.clone(), now);

        if ticket.make != self.values.make {
            debug!("Make changed since request for {}, not applying", key);
            return false;
        }

        self.dispatch(FilterAction::ModelsLoaded(models));
        true
    }

    /// Change the make and fetch its models through `source` when needed
    pub async fn select_make<S>(&mut self, make: Choice<String>, source: &S, now: DateTime<Utc>)
    where
        S: ModelSource + ?Sized,
    {
        if let MakeChange::Fetch(ticket) = self.change_make(make, now) {
            let result = source.fetch_models(ticket.make()).await;
            self.resolve(ticket, result, now);
        }
    }

    /// Models on offer: the list fetched for the current make, else the initial list
    pub fn models(&self) -> &[Model] {
        self.cache
            .get(&self.values.make.to_string())
            .unwrap_or(&self.initial_models)
    }

    pub fn options(&self) -> Vec<SelectOption> {
        let current = self.values.model.to_string();
        let mut options = vec![SelectOption::new(ALL, "All Models", &current)];
        options.extend(self.models().iter().map(|model| {
            SelectOption::new(
                model.model.as_str(),
                format!("{} ({})", model.model, model.count),
                &current,
            )
        }));
        options
    }
}
