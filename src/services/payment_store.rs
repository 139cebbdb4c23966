use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use crate::errors::{AppError, Result};
use crate::models::callback::PaymentFields;
use crate::models::payment::{Payment, PaymentQuery};

pub const PAYMENTS_COLLECTION: &str = "payments";

/// Record store for persisted payments. The handler only depends on this
/// trait so tests can swap in an in-memory store.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts a payment with a creation timestamp assigned here, not by the
    /// caller. Returns the generated record id in hex form.
    async fn create_payment(&self, fields: PaymentFields) -> Result<String>;

    /// Returns payments matching the filters, newest first.
    async fn find_payments(&self, query: PaymentQuery) -> Result<Vec<Payment>>;

    async fn ping(&self) -> bool;
}

pub struct MongoPaymentStore {
    db: Database,
}

impl MongoPaymentStore {
    pub fn new(db: Database) -> Self {
        MongoPaymentStore { db }
    }

    fn collection(&self) -> Collection<Payment> {
        self.db.collection(PAYMENTS_COLLECTION)
    }
}

#[async_trait]
impl PaymentStore for MongoPaymentStore {
    async fn create_payment(&self, fields: PaymentFields) -> Result<String> {
        let payment = Payment {
            id: None,
            amount: fields.amount,
            receipt_number: fields.receipt_number,
            phone_number: fields.phone_number,
            timestamp: Utc::now(),
        };

        let insert_result = self.collection().insert_one(&payment).await?;

        let payment_id = insert_result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::service("Failed to get inserted ID"))?
            .to_hex();

        Ok(payment_id)
    }

    async fn find_payments(&self, query: PaymentQuery) -> Result<Vec<Payment>> {
        let mut filter = doc! {};

        if let Some(phone_number) = &query.phone_number {
            filter.insert("phoneNumber", phone_number);
        }

        if let Some(receipt_number) = &query.receipt_number {
            filter.insert("receiptNumber", receipt_number);
        }

        let cursor = self.collection().find(filter).await?;
        let mut payments: Vec<Payment> = cursor.try_collect().await?;

        payments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(payments)
    }

    async fn ping(&self) -> bool {
        self.db.run_command(doc! {"ping": 1}).await.is_ok()
    }
}
