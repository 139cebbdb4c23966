use axum::{routing::get, Router};

use crate::handlers::payment_handlers;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/", get(payment_handlers::get_payments))
}
