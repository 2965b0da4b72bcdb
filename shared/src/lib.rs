//! Shared types for the Larder services
//!
//! Domain models and the unified error system used by the server and its
//! clients.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
