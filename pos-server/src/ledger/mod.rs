//! Sale/Payment Ledger
//!
//! Append-only record of finalized sales and the payments recorded against
//! them. Nothing here is ever edited or deleted.

mod sales;
mod summary;

pub use sales::SaleLedger;
pub use summary::summarize;

#[cfg(test)]
mod tests;
