//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request-id + trace layers)
//!     → request.rs (request id)
//!     → relay handler: decode → journal → relay::executor → journal
//!     → response.rs (JSON reply or plain-text error)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use response::json_reply;
pub use server::{AppState, HttpServer};
