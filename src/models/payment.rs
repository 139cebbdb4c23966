use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A successful payment persisted from a gateway callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub amount: f64,

    #[serde(rename = "receiptNumber")]
    pub receipt_number: String,

    #[serde(rename = "phoneNumber")]
    pub phone_number: String,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub phone_number: Option<String>,
    pub receipt_number: Option<String>,
}
