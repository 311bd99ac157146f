use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::relay::RelayId;
use crate::store::JournalEntry;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub requests: usize,
    pub responses: usize,
    pub last_id: RelayId,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let stats = state.journal.stats();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        requests: stats.requests,
        responses: stats.responses,
        last_id: stats.last_id,
    })
}

pub async fn get_entries(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    Json(state.journal.entries())
}

pub async fn get_entry(State(state): State<AppState>, Path(id): Path<RelayId>) -> Response {
    match state.journal.entry(id) {
        Some(entry) => Json(entry).into_response(),
        None => (StatusCode::NOT_FOUND, format!("No relay call with id {}\n", id)).into_response(),
    }
}
