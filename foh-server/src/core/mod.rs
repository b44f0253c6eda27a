//! Core module — server configuration, state and errors
//!
//! - [`Config`] — environment-driven configuration
//! - [`ServerState`] — shared application state
//! - [`Server`] — HTTP server
//! - [`ServerError`] — server lifecycle errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
