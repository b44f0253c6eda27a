//! Dining Table Repository
//!
//! Plain CRUD plus the seat/release assignment transaction. Seat and
//! release each touch two rows (the reservation's status and the table's
//! occupancy pointer) and must commit or roll back as one unit.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::booking::lifecycle::ReservationStatus;
use crate::db::models::{DiningTable, Reservation};
use crate::utils::time::now_millis;

/// Insert a new table. Name and capacity are validated at the handler.
pub async fn create(pool: &SqlitePool, table_name: String, capacity: i64) -> RepoResult<DiningTable> {
    let now = now_millis();
    let table = sqlx::query_as::<_, DiningTable>(
        "INSERT INTO dining_table (table_name, capacity, reservation_id, created_at, updated_at) \
         VALUES (?1, ?2, NULL, ?3, ?4) RETURNING *",
    )
    .bind(&table_name)
    .bind(capacity)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(table)
}

/// Find a table by id.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_table WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

/// All tables, ordered by name.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables =
        sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_table ORDER BY table_name")
            .fetch_all(pool)
            .await?;
    Ok(tables)
}

/// Seat a booked reservation at a free table.
///
/// Both writes happen inside one transaction; any precondition failure
/// returns before commit and sqlx rolls the transaction back on drop, so
/// no caller ever observes the reservation seated without the table
/// occupied or vice versa.
pub async fn seat(
    pool: &SqlitePool,
    table_id: i64,
    reservation_id: i64,
) -> RepoResult<DiningTable> {
    let mut tx = pool.begin().await?;

    let reservation =
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservation WHERE id = ?1")
            .bind(reservation_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {reservation_id} not found")))?;
    if reservation.status != ReservationStatus::Booked {
        return Err(RepoError::BusinessRule(format!(
            "Only a booked reservation can be seated; reservation {reservation_id} is {}.",
            reservation.status
        )));
    }

    let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_table WHERE id = ?1")
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))?;
    if table.reservation_id.is_some() {
        return Err(RepoError::Conflict(format!(
            "Table '{}' is already occupied.",
            table.table_name
        )));
    }
    if table.capacity < reservation.people {
        return Err(RepoError::BusinessRule(format!(
            "Table '{}' seats {}, not enough for a party of {}.",
            table.table_name, table.capacity, reservation.people
        )));
    }

    let now = now_millis();
    let seated = sqlx::query(
        "UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(ReservationStatus::Seated)
    .bind(now)
    .bind(reservation_id)
    .bind(ReservationStatus::Booked)
    .execute(&mut *tx)
    .await?;
    if seated.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Reservation {reservation_id} is no longer available for seating."
        )));
    }

    // Conditional write: only a free table may be claimed. A concurrent
    // seat on the same table loses here and the transaction rolls back.
    let claimed = sqlx::query(
        "UPDATE dining_table SET reservation_id = ?1, updated_at = ?2 \
         WHERE id = ?3 AND reservation_id IS NULL",
    )
    .bind(reservation_id)
    .bind(now)
    .bind(table_id)
    .execute(&mut *tx)
    .await?;
    if claimed.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Table '{}' is already occupied.",
            table.table_name
        )));
    }

    tx.commit().await?;

    find_by_id(pool, table_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))
}

/// Free a table and finish the reservation seated at it.
///
/// The occupancy write is conditional on the table still referencing the
/// given reservation; both writes commit or roll back together.
pub async fn release(
    pool: &SqlitePool,
    table_id: i64,
    reservation_id: i64,
) -> RepoResult<DiningTable> {
    let mut tx = pool.begin().await?;
    let now = now_millis();

    let freed = sqlx::query(
        "UPDATE dining_table SET reservation_id = NULL, updated_at = ?1 \
         WHERE id = ?2 AND reservation_id = ?3",
    )
    .bind(now)
    .bind(table_id)
    .bind(reservation_id)
    .execute(&mut *tx)
    .await?;
    if freed.rows_affected() == 0 {
        return Err(RepoError::BusinessRule(format!(
            "Table {table_id} is not occupied by reservation {reservation_id}."
        )));
    }

    sqlx::query("UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(ReservationStatus::Finished)
        .bind(now)
        .bind(reservation_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_by_id(pool, table_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))
}
