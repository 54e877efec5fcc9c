//! Country Vocabulary Route

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Response for the countries endpoint
#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub data: Vec<String>,
    pub count: usize,
}

/// Get the canonical country vocabulary, sorted alphabetically for
/// display layers
pub async fn get_countries(State(state): State<Arc<AppState>>) -> Json<CountriesResponse> {
    let data = state.store.countries().sorted_names();

    Json(CountriesResponse {
        count: data.len(),
        data,
    })
}
