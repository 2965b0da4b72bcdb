//! Data models
//!
//! Shared between larder-server and its clients (via API).
//! Store-assigned IDs are `i64` (SQLite INTEGER PRIMARY KEY); orders are keyed
//! by their allocated order number.

pub mod inventory;
pub mod order;
pub mod supplier;

// Re-exports
pub use inventory::*;
pub use order::*;
pub use supplier::*;
