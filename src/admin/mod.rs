//! Read-only lookup surface over the relay journal.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/entries", get(get_entries))
        .route("/admin/entries/{id}", get(get_entry))
}
