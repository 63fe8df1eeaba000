//! BookingManager

use serde_json::{Map, Value};
use shared::models::{Booking, BookingCreate, BookingStatus, BookingUpdate};
use shared::util::{now_millis, snowflake_id};
use tracing::{info, warn};

use crate::db::StoreHandle;
use crate::db::repository::{BookingRepository, Updated};
use crate::pricing::{self, money};
use crate::utils::validation::{
    MAX_ITEMS, MAX_NAME_LEN, MAX_NOTE_LEN, require, require_finite, validate_optional_text,
    validate_price, validate_quantity, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn booking_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {} not found", id))
        .with_detail("bookingId", id)
}

fn transition_rejected(id: i64, current: BookingStatus, target: Option<BookingStatus>) -> AppError {
    let message = match target {
        Some(target) => format!("Booking {} is {} and cannot become {}", id, current, target),
        None => format!("Booking {} is {} and can no longer be modified", id, current),
    };
    AppError::invalid_transition(message)
        .with_detail("bookingId", id)
        .with_detail("status", current.as_str())
}

/// Booking lifecycle manager
#[derive(Clone)]
pub struct BookingManager {
    repo: BookingRepository,
}

impl BookingManager {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            repo: BookingRepository::new(store),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Booking> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| booking_not_found(id))
    }

    /// Whether a booking with this id exists
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.repo.find_by_id(id).await?.is_some())
    }

    /// Create an open booking
    ///
    /// The bill total is always recomputed from the line items. A client total
    /// that disagrees is kept in `submittedTotal` and logged for audit.
    pub async fn create(&self, payload: BookingCreate) -> AppResult<Booking> {
        let customer_id = require(payload.customer_id, "customerId")?;
        if customer_id <= 0 {
            return Err(AppError::validation(format!(
                "customerId must be a positive id, got {}",
                customer_id
            )));
        }
        let table_number = require(payload.table_number, "tableNumber")?;
        validate_required_text(&table_number, "tableNumber", MAX_NAME_LEN)?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        if payload.items.len() > MAX_ITEMS {
            return Err(AppError::validation(format!(
                "Too many items ({}, max {})",
                payload.items.len(),
                MAX_ITEMS
            )));
        }
        for (i, item) in payload.items.iter().enumerate() {
            validate_required_text(&item.name, &format!("items[{i}].name"), MAX_NAME_LEN)?;
            validate_quantity(item.qty, &format!("items[{i}].qty"))?;
            validate_price(item.price, &format!("items[{i}].price"))?;
        }
        if let Some(submitted) = payload.bill_total {
            require_finite(submitted, "billTotal")?;
        }

        let bill_total = pricing::bill_total(&payload.items);
        let submitted_total = payload
            .bill_total
            .filter(|submitted| money::differs(*submitted, bill_total));

        let now = now_millis();
        let booking = Booking {
            id: snowflake_id(),
            customer_id,
            table_number: table_number.trim().to_string(),
            items: payload.items,
            bill_total,
            status: BookingStatus::Open,
            created_at: now,
            booking_time: payload.booking_time.unwrap_or(now),
            closed_at: None,
            submitted_total,
            receipt: payload.receipt,
            notes: payload.notes,
        };

        if let Some(submitted) = submitted_total {
            warn!(
                target: "audit",
                booking_id = booking.id,
                submitted_total = submitted,
                recomputed_total = bill_total,
                "Client bill total disagrees with line items, using recomputed total"
            );
        }

        self.repo.create(&booking).await?;
        info!(
            booking_id = booking.id,
            table = %booking.table_number,
            bill_total = booking.bill_total,
            items = booking.items.len(),
            "Booking created"
        );
        Ok(booking)
    }

    /// Partial update of status and/or booking time
    ///
    /// Closed and cancelled bookings are read-only. The write is guarded on the
    /// stored status still being `open`, so of two concurrent close/cancel
    /// requests exactly one succeeds and the other gets `InvalidTransition`.
    pub async fn update(&self, id: i64, payload: BookingUpdate) -> AppResult<Booking> {
        if payload.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        let target = payload
            .status
            .as_deref()
            .map(str::parse::<BookingStatus>)
            .transpose()
            .map_err(|e| AppError::validation(e.to_string()).with_detail("field", "status"))?;

        let current = self.get(id).await?;
        if current.status.is_terminal() {
            return Err(transition_rejected(id, current.status, target));
        }
        if let Some(target) = target
            && !current.status.can_transition_to(target)
        {
            return Err(transition_rejected(id, current.status, Some(target)));
        }

        let mut fields = Map::new();
        if let Some(target) = target {
            fields.insert("status".into(), Value::from(target.as_str()));
            if target.is_terminal() {
                fields.insert("closedAt".into(), Value::from(now_millis()));
            }
        }
        if let Some(booking_time) = payload.booking_time {
            fields.insert("bookingTime".into(), Value::from(booking_time));
        }

        match self.repo.update_while_open(id, Value::Object(fields)).await? {
            Updated::Applied(booking) => {
                info!(
                    booking_id = id,
                    status = %booking.status,
                    "Booking updated"
                );
                Ok(booking)
            }
            Updated::Missing => Err(booking_not_found(id)),
            Updated::Rejected(stored) => {
                warn!(
                    booking_id = id,
                    status = %stored.status,
                    "Booking changed concurrently, update rejected"
                );
                Err(transition_rejected(id, stored.status, target))
            }
        }
    }
}
