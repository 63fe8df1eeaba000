//! Discount Directory
//!
//! Validates and stores discount definitions, tracks the `active` flag and
//! resolves redemption codes for the sale write path.

mod directory;

pub use directory::{DiscountDirectory, normalize_code};
