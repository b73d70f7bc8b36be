use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::api::extractors::json::ValidJson;
use crate::api::dtos::{
    requests::{CreateBookingRequest, ListBookingsQuery, UpdateBookingRequest},
    responses::{BookingCreatedResponse, SuccessResponse},
};
use crate::domain::models::booking::LedgerField;
use crate::domain::services::listing::{admin_view, next_class, participant_view};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use chrono::Utc;
use chrono_tz::Tz;
use tracing::info;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let records = state.ledger_repo.list_all().await?;

    let records = match query.order.as_deref() {
        None | Some("") | Some("ledger") => records,
        Some("latest") => admin_view(records),
        Some(other) => return Err(AppError::Validation(format!("Unknown order: {}", other))),
    };

    let records = match query.nick_name.as_deref() {
        Some(name) if !name.is_empty() => participant_view(records, name),
        _ => records,
    };

    Ok(Json(records))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.validate()?;

    info!("create_booking: {} on {} for {}", request.event_title, request.date, request.participant_name);

    let admission = state.ledger_repo.admit(&request, &state.admission).await?;

    Ok(Json(BookingCreatedResponse {
        success: true,
        event_count: admission.ordinal,
        status: admission.record.status,
        price: admission.record.price_per_seat,
    }))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let field: LedgerField = payload.field.parse().map_err(AppError::InvalidField)?;

    if let Some(key) = payload.row_key() {
        state.ledger_repo.set_flag(&key, field, payload.value).await?;
        info!("Booking {:?} of {} on {} set to {}", field, key.participant_name, key.date, payload.value);
    } else if let Some(position) = payload.row_index {
        state.ledger_repo.set_flag_at(position, field, payload.value).await?;
        info!("Booking at position {} {:?} set to {}", position, field, payload.value);
    } else {
        return Err(AppError::Validation("Missing booking identification data".into()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_next_class(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let tz: Tz = state.config.studio_timezone.parse().unwrap_or(chrono_tz::UTC);
    let today = Utc::now().with_timezone(&tz).date_naive();

    let records = state.ledger_repo.list_all().await?;
    Ok(Json(next_class(&records, today)))
}
