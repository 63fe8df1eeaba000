//! Terminal Registry & Linking Protocol
//!
//! Issues link codes for locations, binds a till to a location and tracks
//! heartbeat-based liveness.

pub mod link_code;
mod registry;

pub use registry::TerminalRegistry;
