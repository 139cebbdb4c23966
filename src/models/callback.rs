// models/callback.rs
//
// Wire shapes for the STK push callback. The gateway posts
// `{ Body: { stkCallback: { ... } } }`; only the inner object is typed here
// because the handler needs the raw body anyway for archiving.
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct StkCallback {
    #[serde(rename = "MerchantRequestID", default)]
    pub merchant_request_id: Option<String>,

    #[serde(rename = "CheckoutRequestID", default)]
    pub checkout_request_id: Option<String>,

    #[serde(rename = "ResultCode")]
    pub result_code: i64,

    #[serde(rename = "ResultDesc", default)]
    pub result_desc: String,

    #[serde(rename = "CallbackMetadata", default)]
    pub callback_metadata: Option<CallbackMetadata>,
}

impl StkCallback {
    pub fn metadata_items(&self) -> &[MetadataItem] {
        self.callback_metadata
            .as_ref()
            .map(|metadata| metadata.items.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackMetadata {
    #[serde(rename = "Item", default)]
    pub items: Vec<MetadataItem>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataItem {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Value", default)]
    pub value: Value,
}

/// Metadata item names the handler cares about. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataField {
    Amount,
    ReceiptNumber,
    PhoneNumber,
    Unknown,
}

impl MetadataField {
    fn from_name(name: &str) -> Self {
        match name {
            "Amount" => MetadataField::Amount,
            "MpesaReceiptNumber" => MetadataField::ReceiptNumber,
            "PhoneNumber" => MetadataField::PhoneNumber,
            _ => MetadataField::Unknown,
        }
    }
}

/// Payment attributes extracted from the metadata item list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFields {
    pub amount: f64,
    pub receipt_number: String,
    pub phone_number: String,
}

impl PaymentFields {
    /// Folds the item list into the three payment attributes. Later items
    /// with the same name overwrite earlier captures.
    pub fn from_items(items: &[MetadataItem]) -> Self {
        let mut fields = PaymentFields::default();

        for item in items {
            match MetadataField::from_name(&item.name) {
                MetadataField::Amount => {
                    if let Some(amount) = item.value.as_f64() {
                        fields.amount = amount;
                    }
                }
                MetadataField::ReceiptNumber => {
                    if let Some(receipt) = value_as_string(&item.value) {
                        fields.receipt_number = receipt;
                    }
                }
                MetadataField::PhoneNumber => {
                    if let Some(phone) = value_as_string(&item.value) {
                        fields.phone_number = phone;
                    }
                }
                MetadataField::Unknown => {}
            }
        }

        fields
    }
}

// The gateway delivers PhoneNumber as a JSON number and receipts as strings,
// so both renderings are accepted.
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str, value: Value) -> MetadataItem {
        MetadataItem {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn extracts_all_three_fields() {
        let items = vec![
            item("Amount", json!(100)),
            item("MpesaReceiptNumber", json!("QWE123")),
            item("PhoneNumber", json!("254712345678")),
        ];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.amount, 100.0);
        assert_eq!(fields.receipt_number, "QWE123");
        assert_eq!(fields.phone_number, "254712345678");
    }

    #[test]
    fn missing_items_leave_defaults() {
        let items = vec![item("Amount", json!(50.5))];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.amount, 50.5);
        assert_eq!(fields.receipt_number, "");
        assert_eq!(fields.phone_number, "");
    }

    #[test]
    fn empty_list_yields_all_defaults() {
        let fields = PaymentFields::from_items(&[]);
        assert_eq!(fields, PaymentFields::default());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let items = vec![
            item("Balance", json!(9000)),
            item("TransactionDate", json!(20240801121314_i64)),
            item("Amount", json!(75)),
        ];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.amount, 75.0);
        assert_eq!(fields.receipt_number, "");
    }

    #[test]
    fn later_duplicates_overwrite_earlier_captures() {
        let items = vec![
            item("Amount", json!(10)),
            item("Amount", json!(20)),
            item("MpesaReceiptNumber", json!("AAA111")),
            item("MpesaReceiptNumber", json!("BBB222")),
        ];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.amount, 20.0);
        assert_eq!(fields.receipt_number, "BBB222");
    }

    #[test]
    fn numeric_phone_number_is_rendered_as_string() {
        let items = vec![item("PhoneNumber", json!(254712345678_i64))];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.phone_number, "254712345678");
    }

    #[test]
    fn non_numeric_amount_keeps_the_default() {
        let items = vec![item("Amount", json!("not-a-number"))];

        let fields = PaymentFields::from_items(&items);
        assert_eq!(fields.amount, 0.0);
    }

    #[test]
    fn callback_without_metadata_deserializes() {
        let callback: StkCallback = serde_json::from_value(json!({
            "ResultCode": 1032,
            "ResultDesc": "Request cancelled by user"
        }))
        .unwrap();

        assert_eq!(callback.result_code, 1032);
        assert!(callback.metadata_items().is_empty());
    }

    #[test]
    fn callback_without_result_code_is_rejected() {
        let result: std::result::Result<StkCallback, _> =
            serde_json::from_value(json!({ "ResultDesc": "no code" }));
        assert!(result.is_err());
    }
}
