use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::header::CACHE_CONTROL,
    response::{Html, IntoResponse},
    Json,
};
use tracing::debug;

use crate::error::AppError;
use crate::models::{CarPage, Make, Model};
use crate::search::{
    filter::{Choice, MAKE_KEY},
    ModelSelector, Pagination, QueryParams, SearchForm,
};

use super::{render, state::AppState};

fn query_params(raw: Option<String>) -> QueryParams {
    raw.as_deref().map(QueryParams::parse).unwrap_or_default()
}

/// Server-side data for the search form: all makes, and the models of the make in the URL
async fn load_search_props(
    state: &AppState,
    query: &QueryParams,
) -> Result<(Vec<Make>, Vec<Model>), AppError> {
    let make = Choice::<String>::parse(&query.get_str(MAKE_KEY));
    let make = make.as_option().map(String::as_str);

    let (makes, models) = tokio::try_join!(
        state.inventory.get_makes(),
        state.inventory.get_models(make)
    )?;

    Ok((makes, models))
}

fn search_form_html(
    state: &AppState,
    query: &QueryParams,
    makes: Vec<Make>,
    models: Vec<Model>,
    single_column: bool,
) -> String {
    let values = SearchForm::initial_values(query);
    let selector = ModelSelector::new(values.clone(), models.clone(), state.models_window());
    let form = SearchForm::new(makes, models, single_column);

    render::search_form(&form, &values, &selector.options())
}

pub async fn home_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let query = query_params(raw);
    let (makes, models) = load_search_props(&state, &query).await?;

    let form = search_form_html(&state, &query, makes, models, false);
    Ok(render::page(
        "Car Search",
        &form,
        state.config.models_ttl_secs,
    ))
}

pub async fn cars_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let query = query_params(raw);
    let filters = SearchForm::initial_values(&query);

    let ((makes, models), results) = tokio::try_join!(
        load_search_props(&state, &query),
        async {
            state
                .inventory
                .get_cars(&filters, state.config.page_size)
                .await
                .map_err(AppError::from)
        }
    )?;
    debug!(
        "Rendering {} cars, page {} of {}",
        results.cars.len(),
        filters.page,
        results.total_pages
    );

    let pagination = Pagination::new(&query, results.total_pages);
    let body = format!(
        r#"<div class="results-layout">{form}<section class="results">{cards}{pages}</section></div>"#,
        form = search_form_html(&state, &query, makes, models, true),
        cards = render::car_cards(&results.cars),
        pages = render::pagination(&pagination),
    );

    Ok(render::page("Cars", &body, state.config.models_ttl_secs))
}

pub async fn models_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let query = query_params(raw);
    let make = Choice::<String>::parse(&query.get_str(MAKE_KEY));

    let models = state
        .inventory
        .get_models(make.as_option().map(String::as_str))
        .await?;
    debug!("Serving {} models for make {}", models.len(), make);

    let cache_control = format!("max-age={}", state.config.models_ttl_secs);
    Ok(([(CACHE_CONTROL, cache_control)], Json(models)))
}

pub async fn cars_api_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<CarPage>, AppError> {
    let filters = SearchForm::initial_values(&query_params(raw));
    let page = state
        .inventory
        .get_cars(&filters, state.config.page_size)
        .await?;

    Ok(Json(page))
}
