use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use crate::error::AppError;

/// `Json` whose rejections come back as `AppError`, so malformed bodies get
/// the same `{"error": ...}` shape as every other 4xx.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            AppError::Validation(rejection.body_text())
        })?;
        Ok(ValidJson(value))
    }
}
