//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `reservation_id` is the occupancy pointer: non-null exactly while the
/// referenced reservation is seated at this table. It is only ever written
/// by the seat/release transaction, never by a generic update.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub table_name: String,
    pub capacity: i64,
    pub reservation_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
///
/// Fields stay optional so missing ones produce a validation message
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiningTableCreate {
    pub table_name: Option<String>,
    pub capacity: Option<i64>,
}
