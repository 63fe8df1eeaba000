//! Sale and Payment Models
//!
//! Sales and payments are append-only ledger records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "online" => Ok(Self::Online),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

/// Sale line item, denormalized for receipt fidelity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "qty")]
    pub quantity: i32,
    #[serde(alias = "price")]
    pub unit_price: f64,
}

/// Payment embedded in a sale at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePayment {
    pub amount: f64,
    pub method: PaymentMethod,
}

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub items: Vec<SaleItem>,
    /// Pre-tax total
    pub total: f64,
    pub vat: f64,
    /// Discount amount applied
    pub discount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub paid: f64,
    pub payments: Vec<SalePayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    /// Settlement at creation time (display only)
    pub settled: bool,
    pub outstanding: f64,
    pub created_at: i64,
}

/// Embedded payment as sent by the terminal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalePaymentInput {
    pub amount: Option<f64>,
    pub method: Option<String>,
}

/// Create sale payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    #[serde(default)]
    pub items: Vec<SaleItem>,
    /// Required when `items` is empty (offline precomputed sale)
    pub total: Option<f64>,
    /// Authoritative when present and non-zero
    pub vat: Option<f64>,
    pub discount_code: Option<String>,
    /// Precomputed discount amount, ignored when `discount_code` is given
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub payments: Vec<SalePaymentInput>,
    pub booking_id: Option<i64>,
}

/// Ledger payment referencing a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub sale_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    #[serde(alias = "sale_id")]
    pub sale_id: Option<i64>,
    pub amount: Option<f64>,
    pub method: Option<String>,
}

/// Settlement status of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// `total + vat - discount`
    pub amount_due: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub settled: bool,
}

/// Read-only ledger aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub sale_count: usize,
    pub total_sales: f64,
    pub total_vat: f64,
    pub total_discounts: f64,
    /// Paid at checkout (embedded payments)
    pub total_paid: f64,
    /// Recorded afterwards through the payments ledger
    pub total_payments: f64,
    pub outstanding: f64,
}
