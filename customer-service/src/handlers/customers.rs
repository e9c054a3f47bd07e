use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::{models::Customer, AppState};

pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customers.list_customers().await?;

    tracing::info!(count = customers.len(), "Returning customers");

    Ok(Json(customers))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    tracing::info!(customer_id = %customer_id, "Fetching customer");

    let customer = state
        .customers
        .get_customer(&customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    Ok(Json(customer))
}

/// Responds 201 with an empty body; the save identifier is not exposed.
///
/// The body is parsed as JSON whatever `Content-Type` the caller sent.
pub async fn add_customer(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let payload: Customer = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting malformed customer payload");
        AppError::BadRequest(anyhow::anyhow!("Invalid customer payload: {}", e))
    })?;
    payload.validate()?;

    tracing::info!(
        customer_id = %payload.customer_id,
        vip_status = ?payload.vip_status,
        "Saving customer"
    );

    state.customers.add_customer(payload).await?;

    Ok(StatusCode::CREATED)
}
