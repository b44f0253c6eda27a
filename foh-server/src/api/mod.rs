//! API route modules
//!
//! # Structure
//!
//! - [`health`] — liveness check
//! - [`reservations`] — reservation intake, lookup, status lifecycle
//! - [`tables`] — dining tables and the seat/release assignment

pub mod health;
pub mod reservations;
pub mod tables;

use axum::Router;
use serde::Deserialize;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Request body wrapper: every mutating endpoint takes `{ "data": { ... } }`.
///
/// A missing or null `data` object is the one validation failure that
/// short-circuits everything else (there is nothing to check).
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Assemble the full application router.
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(tables::router())
}
