//! Booking Model
//!
//! A booking is an open tab or reservation against a table. It accumulates
//! line items and a bill total until it is closed or cancelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::serde_helpers::option_millis;

/// Booking status
///
/// `Open` is the only non-terminal state: `open -> closed`, `open -> cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Open,
    Closed,
    Cancelled,
}

impl BookingStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Closed and cancelled bookings never change status again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// Whether moving from `self` to `target` is a legal status change
    ///
    /// `open -> open` is accepted as a no-op.
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Open) | (Self::Open, Self::Closed) | (Self::Open, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown booking status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Booking line item
///
/// `name` and `price` are snapshots taken when the item was added; the
/// product itself is only referenced weakly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "quantity")]
    pub qty: i32,
    pub price: f64,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub table_number: String,
    pub items: Vec<BookingItem>,
    /// Sum of `price * qty` over `items`, always recomputed server-side
    pub bill_total: f64,
    pub status: BookingStatus,
    pub created_at: i64,
    pub booking_time: i64,
    /// Set exactly when `status` is closed or cancelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    /// Client-submitted total, kept only when it disagreed with `bill_total`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_total: Option<f64>,
    /// Embedded receipt snapshot (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create booking payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub customer_id: Option<i64>,
    pub table_number: Option<String>,
    #[serde(default, alias = "products")]
    pub items: Vec<BookingItem>,
    pub bill_total: Option<f64>,
    #[serde(default, deserialize_with = "option_millis")]
    pub booking_time: Option<i64>,
    pub receipt: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// Partial booking update: status and/or booking time
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "option_millis")]
    pub booking_time: Option<i64>,
}

impl BookingUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.booking_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use BookingStatus::*;
        assert!(Open.can_transition_to(Closed));
        assert!(Open.can_transition_to(Cancelled));
        assert!(Open.can_transition_to(Open));
        for from in [Closed, Cancelled] {
            for to in [Open, Closed, Cancelled] {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("OPEN".parse::<BookingStatus>(), Ok(BookingStatus::Open));
        assert_eq!(
            "canceled".parse::<BookingStatus>(),
            Ok(BookingStatus::Cancelled)
        );
        assert!("paid".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_create_accepts_legacy_field_names() {
        let json = r#"{
            "customerId": 5,
            "tableNumber": "T4",
            "products": [{"name": "Coffee", "quantity": 2, "price": 2.5}],
            "billTotal": 5.0,
            "bookingTime": "2025-01-31T19:30"
        }"#;
        let create: BookingCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.items.len(), 1);
        assert_eq!(create.items[0].qty, 2);
        assert_eq!(create.booking_time, Some(1_738_351_800_000));
    }

    #[test]
    fn test_open_booking_omits_closed_at() {
        let booking = Booking {
            id: 1,
            customer_id: 2,
            table_number: "T1".into(),
            items: vec![],
            bill_total: 0.0,
            status: BookingStatus::Open,
            created_at: 10,
            booking_time: 10,
            closed_at: None,
            submitted_total: None,
            receipt: None,
            notes: None,
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["status"], "open");
        assert!(json.get("closedAt").is_none());
        assert_eq!(json["tableNumber"], "T1");
    }
}
