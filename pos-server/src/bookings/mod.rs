//! Booking Lifecycle Manager
//!
//! Owns Booking documents: creation with a recomputed bill total, and the
//! `open -> closed | cancelled` state machine.

mod manager;

pub use manager::BookingManager;
