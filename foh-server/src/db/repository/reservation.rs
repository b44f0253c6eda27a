//! Reservation Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::booking::lifecycle::ReservationStatus;
use crate::booking::validate::NewReservation;
use crate::db::models::Reservation;
use crate::utils::time::now_millis;

/// Insert a validated reservation.
///
/// Status is forced to `booked` here regardless of the request; the intake
/// pipeline already rejected any client-supplied status other than booked.
pub async fn create(pool: &SqlitePool, data: NewReservation) -> RepoResult<Reservation> {
    let now = now_millis();
    let reservation = sqlx::query_as::<_, Reservation>(
        "INSERT INTO reservation \
         (first_name, last_name, mobile_number, reservation_date, reservation_time, people, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING *",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(&data.reservation_date)
    .bind(&data.reservation_time)
    .bind(data.people)
    .bind(ReservationStatus::Booked)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(reservation)
}

/// Find a reservation by id.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservation WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

/// Write a new status. The lifecycle check happens before this is called;
/// this is the plain persistence half of a status update.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Reservation> {
    sqlx::query_as::<_, Reservation>(
        "UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3 RETURNING *",
    )
    .bind(status)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Reservations on a date, ordered by time, excluding finished ones.
pub async fn list_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservation \
         WHERE reservation_date = ?1 AND status != ?2 \
         ORDER BY reservation_time",
    )
    .bind(date)
    .bind(ReservationStatus::Finished)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Reservations whose mobile number contains the digits of `fragment`,
/// any status, ordered by date then time.
pub async fn search_by_phone(pool: &SqlitePool, fragment: &str) -> RepoResult<Vec<Reservation>> {
    let digits: String = fragment.chars().filter(|c| c.is_ascii_digit()).collect();
    let pattern = format!("%{digits}%");
    let reservations = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservation \
         WHERE REPLACE(mobile_number, '-', '') LIKE ?1 \
         ORDER BY reservation_date, reservation_time",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}
