use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ContactRequest, ContactResponse},
    state::SharedState,
};

pub async fn contact_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::internal("Internal server error", e.body_text()))?;
    let response = state.contacts.submit(request).await?;
    Ok(Json(response))
}
