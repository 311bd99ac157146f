//! HTTP server setup and the relay endpoint.
//!
//! # Responsibilities
//! - Create the Axum Router (relay endpoint + optional admin routes)
//! - Wire up middleware (request ID, tracing)
//! - Decode request descriptions, journal them, execute, journal the outcome
//! - Serve on a listener until shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::admin;
use crate::config::RelayConfig;
use crate::http::request::{request_id, UuidRequestId};
use crate::http::response::json_reply;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::lifecycle::signals::shutdown_requested;
use crate::observability::metrics;
use crate::relay::{HttpExecutor, RelayError, RelayResult, RequestRecord, ResponseRecord};
use crate::store::RelayJournal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<RelayJournal>,
    pub executor: HttpExecutor,
    pub max_body_bytes: usize,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
    journal: Arc<RelayJournal>,
}

impl HttpServer {
    /// Create a new HTTP server with a fresh journal.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        Self::with_journal(config, Arc::new(RelayJournal::new()))
    }

    /// Create a server recording into an existing journal.
    pub fn with_journal(
        config: RelayConfig,
        journal: Arc<RelayJournal>,
    ) -> Result<Self, reqwest::Error> {
        let state = AppState {
            journal: journal.clone(),
            executor: HttpExecutor::new(&config.outbound)?,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            journal,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let mut router = Router::new().route(
            &config.relay.path,
            post(relay_handler).fallback(method_not_allowed),
        );

        if config.admin.enabled {
            router = router.merge(admin::setup_admin_router());
        }

        router
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until an OS signal arrives or `shutdown` is triggered.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.relay.path,
            admin = self.config.admin.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn journal(&self) -> Arc<RelayJournal> {
        self.journal.clone()
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay endpoint handler (POST only).
async fn relay_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, RelayError> {
    let span = tracing::info_span!("relay", request_id = %request_id(&headers));

    let outcome = relay(&state, body).instrument(span.clone()).await;

    span.in_scope(|| match &outcome {
        Ok(record) => {
            tracing::info!(id = record.id, status = record.status, length = record.length, "Relay call completed");
            metrics::record_call("ok");
        }
        Err(e @ RelayError::BadInput(_)) => {
            tracing::warn!(error = %e, "Rejected request description");
            metrics::record_call(e.kind());
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Relay call failed");
            metrics::record_call(e.kind());
        }
    });

    json_reply(&outcome?)
}

/// Decode, journal, execute, journal.
///
/// The identifier is consumed as soon as the description decodes; a later
/// execution failure leaves the request journaled without a response. The
/// outbound call runs in its own task so it completes even if the caller
/// disconnects.
async fn relay(state: &AppState, body: Body) -> RelayResult<ResponseRecord> {
    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| RelayError::BadInput(format!("error reading request body: {}", e)))?;

    let record: RequestRecord = serde_json::from_slice(&bytes)
        .map_err(|e| RelayError::BadInput(format!("error parsing request body: {}", e)))?;

    let id = state.journal.record_request(record.clone());
    tracing::debug!(id, method = %record.method, url = %record.url, "Request journaled");

    let journal = state.journal.clone();
    let executor = state.executor.clone();
    let task = tokio::spawn(
        async move {
            let response = executor.execute(id, &record).await?;
            journal.record_response(id, response.clone());
            Ok::<_, RelayError>(response)
        }
        .in_current_span(),
    );

    task.await
        .map_err(|e| RelayError::Internal(format!("relay task failed: {}", e)))?
}

async fn method_not_allowed() -> RelayError {
    tracing::warn!("Relay endpoint called with a method other than POST");
    metrics::record_call(RelayError::MethodNotAllowed.kind());
    RelayError::MethodNotAllowed
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
