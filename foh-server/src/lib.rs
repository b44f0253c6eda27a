//! foh-server — restaurant front-of-house reservation and seating backend
//!
//! # Architecture
//!
//! ```text
//! foh-server/src/
//! ├── core/       # configuration, state, HTTP server
//! ├── api/        # routes and handlers
//! ├── booking/    # intake validation pipeline, status lifecycle
//! ├── db/         # SQLite pool, models, repositories
//! └── utils/      # errors, logging, time helpers
//! ```
//!
//! A create/update request flows through the [`booking::validate`] pipeline
//! and the [`booking::lifecycle`] state machine before anything is written;
//! seat/release requests go through the transactional assignment in
//! [`db::repository::dining_table`], which keeps the reservation status and
//! the table's occupancy pointer consistent as one atomic unit.

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export common types
pub use self::core::{Config, Server, ServerState};
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult};
