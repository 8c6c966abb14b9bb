// src/server/routes.rs
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use super::state::AppState;
use crate::{
    data::{ArrivalFilter, ArrivalRecord, StopBoard},
    error::ScheduleError,
    schedule::validate_stop,
};

/// `?stop=<id>&live=<bool>&countdown=<bool>`; the two switches default to off.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub stop: Option<String>,
    #[serde(default)]
    pub live: bool,
    #[serde(default)]
    pub countdown: bool,
}

impl ScheduleQuery {
    pub fn filter(&self) -> ArrivalFilter {
        ArrivalFilter {
            live_only: self.live,
            countdown_only: self.countdown,
        }
    }
}

pub async fn schedule_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<Json<Vec<ArrivalRecord>>, ScheduleError> {
    let Query(query) = query.map_err(|e| ScheduleError::InvalidRequest(e.body_text()))?;

    let records = state
        .service
        .fetch_filtered(query.stop.as_deref(), query.filter())
        .await?;
    Ok(Json(records))
}

/// Live trips only, wrapped with the stop they belong to.
pub async fn stop_board_handler(
    State(state): State<Arc<AppState>>,
    Path(stop): Path<String>,
) -> Result<Json<StopBoard>, ScheduleError> {
    let stop_number = validate_stop(Some(stop.as_str()))?.to_string();

    let trips = state
        .service
        .fetch_filtered(Some(stop_number.as_str()), ArrivalFilter::LIVE)
        .await?;
    Ok(Json(StopBoard { stop_number, trips }))
}
