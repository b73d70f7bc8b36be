use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use std::sync::Arc;

pub async fn list_venues(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.admission.rates().definition().clone())
}
