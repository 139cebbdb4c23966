use axum::{
    extract::{Query, State},
    response::Json,
};
use tracing::info;

use crate::errors::Result;
use crate::models::payment::{Payment, PaymentQuery};
use crate::state::AppState;

// Get persisted payments with optional filtering
pub async fn get_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<Vec<Payment>>> {
    let payments = state.payments.find_payments(query).await?;

    info!("Fetched {} payments", payments.len());
    Ok(Json(payments))
}
