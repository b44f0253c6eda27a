//! Reservation model

use serde::{Deserialize, Serialize};

use crate::booking::lifecycle::ReservationStatus;

/// Reservation entity — one guest booking.
///
/// `reservation_date` and `reservation_time` are stored canonically
/// (`YYYY-MM-DD` / `HH:MM`); the intake pipeline normalizes them before
/// anything reaches this struct.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
