//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::DataEnvelope;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate};
use crate::db::repository::dining_table as repo;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/tables — all tables, ordered by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = repo::find_all(&state.db.pool).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    repo::find_by_id(&state.db.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<DataEnvelope<DiningTableCreate>>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    let payload = body
        .data
        .ok_or_else(|| AppError::invalid("Request body must have a data object."))?;

    let table_name = payload.table_name.unwrap_or_default();
    validate_required_text(&table_name, "table_name", MAX_NAME_LEN)?;
    let capacity = payload.capacity.unwrap_or(0);
    if capacity < 1 {
        return Err(AppError::validation("Table capacity must be at least 1."));
    }

    let table = repo::create(&state.db.pool, table_name, capacity).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

#[derive(Debug, Default, Deserialize)]
pub struct SeatRequest {
    pub reservation_id: Option<i64>,
}

/// PUT /api/tables/{id}/seat — seat a booked reservation at this table
pub async fn seat(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<DataEnvelope<SeatRequest>>,
) -> AppResult<Json<DiningTable>> {
    let request = body
        .data
        .ok_or_else(|| AppError::invalid("Request body must have a data object."))?;
    let reservation_id = request
        .reservation_id
        .ok_or_else(|| AppError::validation("Seat request must include a reservation_id."))?;

    let table = repo::seat(&state.db.pool, id, reservation_id).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id}/seat — free the table, finishing its reservation
pub async fn release(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = repo::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    let reservation_id = table.reservation_id.ok_or_else(|| {
        AppError::business_rule(format!("Table '{}' is not occupied.", table.table_name))
    })?;

    let table = repo::release(&state.db.pool, id, reservation_id).await?;
    Ok(Json(table))
}
