use std::sync::Arc;

use crate::services::archive_store::CallbackArchive;
use crate::services::payment_store::PaymentStore;

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<dyn PaymentStore>,
    pub archive: Arc<dyn CallbackArchive>,
}

impl AppState {
    pub fn new(payments: Arc<dyn PaymentStore>, archive: Arc<dyn CallbackArchive>) -> Self {
        AppState { payments, archive }
    }
}
