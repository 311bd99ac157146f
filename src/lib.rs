//! HTTP relay library: accepts JSON-described HTTP requests, executes them
//! against their origin and returns a JSON summary of the reply.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod store;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::RelayJournal;
