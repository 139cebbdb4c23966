// handlers/mpesa_handlers.rs
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::{error, info};

use crate::errors::{AppError, Result};
use crate::models::callback::{PaymentFields, StkCallback};
use crate::state::AppState;

const ARCHIVE_KEY_PREFIX: &str = "mpesa_callbacks";

/// STK push callback endpoint. Validates the payload shape, persists a
/// payment record on success and archives the raw body under the record id.
/// Gateway-reported failures are acknowledged with 200 and not stored.
pub async fn mpesa_callback(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, &'static str)> {
    info!("Received M-Pesa callback");

    let Some(stk_value) = payload.get("Body").and_then(|body| body.get("stkCallback")) else {
        error!("Invalid M-Pesa callback format: {}", payload);
        return Err(AppError::InvalidCallback);
    };

    let callback: StkCallback = serde_json::from_value(stk_value.clone()).map_err(|e| {
        error!("Malformed stkCallback ({}): {}", e, payload);
        AppError::InvalidCallback
    })?;

    if let Some(checkout_request_id) = &callback.checkout_request_id {
        info!("Processing checkout request {}", checkout_request_id);
    }

    let fields = PaymentFields::from_items(callback.metadata_items());

    if callback.result_code == 0 {
        let amount = fields.amount;
        let receipt_number = fields.receipt_number.clone();
        let phone_number = fields.phone_number.clone();

        let payment_id = state.payments.create_payment(fields).await.map_err(|e| {
            error!("Error saving payment: {}", e);
            e
        })?;

        info!(
            "Payment saved: {} - KES {} from {}",
            receipt_number, amount, phone_number
        );

        let key = format!("{}/{}.json", ARCHIVE_KEY_PREFIX, payment_id);
        let body = serde_json::to_vec_pretty(&payload)?;

        state
            .archive
            .put(&key, body.into(), "application/json")
            .await
            .map_err(|e| {
                error!("Error archiving callback {}: {}", key, e);
                e
            })?;

        info!("Callback archived as {}.json", payment_id);
    } else {
        error!(
            "Payment failed with result code {}: {}",
            callback.result_code, callback.result_desc
        );
    }

    Ok((StatusCode::OK, "Callback received successfully"))
}
