use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::json::ValidJson;
use crate::domain::models::auth::AuthResponse;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.auth_service.authenticate(&payload.password).inspect_err(|_| {
        warn!("Login rejected: wrong password");
    })?;

    info!("Login succeeded with role {:?}", role);
    Ok(Json(AuthResponse { role }))
}
