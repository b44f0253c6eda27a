//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::DataEnvelope;
use crate::booking::lifecycle::{self, ReservationStatus, UnknownStatus};
use crate::booking::validate::{ReservationDraft, validate_create};
use crate::core::ServerState;
use crate::db::models::Reservation;
use crate::db::repository::reservation as repo;
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}

/// GET /api/reservations?date=YYYY-MM-DD | ?mobile_number=fragment
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let pool = &state.db.pool;
    match (query.date.as_deref(), query.mobile_number.as_deref()) {
        (Some(date), None) => {
            let date = parse_date(date)?;
            let reservations = repo::list_by_date(pool, &date.format("%Y-%m-%d").to_string()).await?;
            Ok(Json(reservations))
        }
        (None, Some(fragment)) => Ok(Json(repo::search_by_phone(pool, fragment).await?)),
        _ => Err(AppError::invalid(
            "Provide exactly one of 'date' or 'mobile_number'.",
        )),
    }
}

/// POST /api/reservations — run the intake pipeline, then persist.
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<DataEnvelope<ReservationDraft>>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let draft = body
        .data
        .ok_or_else(|| AppError::invalid("Request body must have a data object."))?;
    let new_reservation = validate_create(&draft, Utc::now()).map_err(AppError::Validation)?;
    let created = repo::create(&state.db.pool, new_reservation).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    repo::find_by_id(&state.db.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// PUT /api/reservations/{id}/status — lifecycle-gated status change.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<DataEnvelope<StatusUpdate>>,
) -> AppResult<Json<Reservation>> {
    let update = body
        .data
        .ok_or_else(|| AppError::invalid("Request body must have a data object."))?;
    let raw = update
        .status
        .ok_or_else(|| AppError::validation("Status update must include a status."))?;
    let requested: ReservationStatus = raw
        .parse()
        .map_err(|e: UnknownStatus| AppError::business_rule(e.to_string()))?;

    let current = repo::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

    lifecycle::check_transition(current.status, requested)
        .map_err(|e| AppError::business_rule(e.to_string()))?;

    let updated = repo::update_status(&state.db.pool, id, requested).await?;
    Ok(Json(updated))
}
