// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::geo::Coordinates;
use crate::middleware::auth::AuthUser;
use crate::models::DailyPick;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via session JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/picks/today", get(get_today_pick))
        .route("/api/picks/{date}/like", post(set_liked))
        .route("/api/picks/{date}/log", post(set_logged))
        .route("/api/picks/{date}", delete(delete_pick))
}

// ─── Today's Pick ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct TodayQuery {
    /// Caller's latitude (paired with lng)
    #[validate(range(min = -90.0, max = 90.0))]
    lat: Option<f64>,
    /// Caller's longitude (paired with lat)
    #[validate(range(min = -180.0, max = 180.0))]
    lng: Option<f64>,
    /// Regenerate even if the cached pick is fresh
    #[serde(default)]
    force: bool,
    /// Client-local calendar date; defaults to today in UTC
    date: Option<NaiveDate>,
}

impl TodayQuery {
    fn coordinates(&self) -> Result<Option<Coordinates>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates::new(lat, lng))),
            (None, None) => Ok(None),
            _ => Err(AppError::BadRequest(
                "lat and lng must be provided together".to_string(),
            )),
        }
    }
}

/// Get (or regenerate) the pick for today.
async fn get_today_pick(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<DailyPick>> {
    query
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let coords = query.coordinates()?;
    let date = query.date.unwrap_or_else(today_utc);

    let pick = state
        .picks
        .get_or_generate(&user.user_id, date, coords, query.force)
        .await?;

    Ok(Json(pick))
}

// ─── Flags ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct LikeBody {
    liked: bool,
}

/// Set the liked flag on a pick.
async fn set_liked(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<NaiveDate>,
    Json(body): Json<LikeBody>,
) -> Result<Json<DailyPick>> {
    let pick = state
        .picks
        .set_liked(&user.user_id, date, body.liked)
        .await?;
    Ok(Json(pick))
}

#[derive(Deserialize)]
struct LogBody {
    logged: bool,
}

/// Set the outfit-of-the-day logged flag on a pick.
async fn set_logged(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<NaiveDate>,
    Json(body): Json<LogBody>,
) -> Result<Json<DailyPick>> {
    let pick = state
        .picks
        .set_logged(&user.user_id, date, body.logged)
        .await?;
    Ok(Json(pick))
}

// ─── Deletion ────────────────────────────────────────────────

/// Clear the pick for a date; the next request regenerates it.
async fn delete_pick(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(user_id = %user.user_id, %date, "User cleared daily pick");
    state.picks.delete_for_date(&user.user_id, date).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
