//! Domain models
//!
//! Shapes shared with the remote settlement service keep its camelCase
//! field names; monetary values are `rust_decimal::Decimal` throughout.

use netplus_printer::PrintDocument;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer record, read-only to this core (owned by the settlement service)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub box_numbers: Vec<String>,
    #[serde(default)]
    pub previous_balance: Decimal,
    #[serde(default)]
    pub current_month_payment: Decimal,
}

impl Customer {
    /// Display-only helper; settlement results are authoritative for balance
    pub fn total_balance(&self) -> Decimal {
        self.previous_balance + self.current_month_payment
    }
}

/// Payment method, matching the literals the settlement service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    GPay,
    PhonePe,
    Paytm,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::GPay,
        PaymentMethod::PhonePe,
        PaymentMethod::Paytm,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::GPay => "GPay",
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::Paytm => "Paytm",
            PaymentMethod::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment to record against a customer; amount must be validated positive
/// before any remote call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub customer_id: String,
    pub amount_paid: Decimal,
    pub payment_method: PaymentMethod,
}

/// Settlement service response. Authoritative: the core never recomputes
/// the balance locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub new_balance: Decimal,
    pub date: String,
    pub time: String,
}

/// Issuer identity printed in the receipt header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerProfile {
    pub name: String,
    pub contact: String,
}

/// Immutable receipt value, built once per successful payment and held only
/// for the duration of the print/share session. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Tagged markup consumed by the BLE backend
    pub markup: String,
    /// Plain text used for chat/SMS links, the intent backend and preview
    pub plain_text: String,
}

impl Receipt {
    pub fn to_document(&self) -> PrintDocument {
        PrintDocument {
            markup: self.markup.clone(),
            plain_text: self.plain_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_total_balance_invariant() {
        let customer = Customer {
            id: "c1".to_string(),
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            box_numbers: vec!["A1".to_string()],
            previous_balance: Decimal::new(750, 0),
            current_month_payment: Decimal::new(250, 0),
        };
        assert_eq!(customer.total_balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_payment_request_wire_shape() {
        let request = PaymentRequest {
            customer_id: "c1".to_string(),
            amount_paid: Decimal::new(250, 0),
            payment_method: PaymentMethod::GPay,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerId"], "c1");
        assert_eq!(json["paymentMethod"], "GPay");
        assert_eq!(json["amountPaid"], 250.0);
    }

    #[test]
    fn test_payment_result_wire_shape() {
        let result: PaymentResult = serde_json::from_str(
            r#"{"newBalance": 1000, "date": "01-01-2024", "time": "10:00"}"#,
        )
        .unwrap();
        assert_eq!(result.new_balance, Decimal::new(1000, 0));
        assert_eq!(result.date, "01-01-2024");
    }

    #[test]
    fn test_customer_defaults_missing_fields() {
        let customer: Customer = serde_json::from_str(
            r#"{"_id": "c1", "name": "Asha", "mobile": "9876543210"}"#,
        )
        .unwrap();
        assert!(customer.box_numbers.is_empty());
        assert_eq!(customer.previous_balance, Decimal::ZERO);
    }
}
