//! Discount Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::{nullable_millis, option_millis};

/// How a discount is redeemed
///
/// Serialized inline as `"type": "static"` or `"type": "code", "code": "..."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiscountKind {
    /// Applied without a code
    Static,
    /// Redeemed by presenting `code` at checkout
    Code { code: String },
}

impl DiscountKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Code { .. } => "code",
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Static => None,
            Self::Code { code } => Some(code),
        }
    }
}

/// Discount value: a percentage off or a fixed amount off
///
/// Serialized inline as `"percent": 10` or `"amount": 2.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountValue {
    Percent(f64),
    Amount(f64),
}

/// Discount entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub value: DiscountValue,
    #[serde(flatten)]
    pub kind: DiscountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Derived at create/renew time, not recomputed on read
    pub active: bool,
}

/// Create / full-replace discount payload
///
/// `type` stays a raw string here so unknown tags surface as validation
/// errors with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCreate {
    pub name: Option<String>,
    pub percent: Option<f64>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub discount_type: Option<String>,
    pub code: Option<String>,
    #[serde(default, deserialize_with = "option_millis")]
    pub expires_at: Option<i64>,
    /// Only honoured by full replacement
    pub active: Option<bool>,
}

/// Partial discount edit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPatch {
    pub name: Option<String>,
    pub percent: Option<f64>,
    pub amount: Option<f64>,
    /// `Some(None)` clears the expiry
    #[serde(default, deserialize_with = "nullable_millis")]
    pub expires_at: Option<Option<i64>>,
    pub active: Option<bool>,
}

impl DiscountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.percent.is_none()
            && self.amount.is_none()
            && self.expires_at.is_none()
            && self.active.is_none()
    }
}
