//! Data models shared between the server and terminals
//!
//! All JSON fields are camelCase; identities are snowflake `i64` and
//! timestamps are Unix milliseconds.

pub mod booking;
pub mod discount;
pub mod location;
pub mod sale;
pub mod serde_helpers;

pub use booking::{Booking, BookingCreate, BookingItem, BookingStatus, BookingUpdate};
pub use discount::{Discount, DiscountCreate, DiscountKind, DiscountPatch, DiscountValue};
pub use location::{
    HeartbeatRequest, HeartbeatResponse, InitialData, LINK_CODE_LEN, LinkRequest, LinkResponse,
    Location, LocationCreate, LocationView,
};
pub use sale::{
    FinanceSummary, Payment, PaymentCreate, PaymentMethod, Sale, SaleCreate, SaleItem,
    SalePayment, SalePaymentInput, Settlement,
};
