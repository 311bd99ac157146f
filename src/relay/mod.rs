//! Relay core: request/response records, the outbound executor and the
//! error taxonomy shared with the HTTP layer.
//!
//! # Data Flow
//! ```text
//! RequestRecord (decoded by http::server)
//!     → executor.rs (build + send outbound call)
//!     → ResponseRecord (status, first-value headers, length)
//! ```

pub mod error;
pub mod executor;
pub mod types;

pub use error::{RelayError, RelayResult};
pub use executor::HttpExecutor;
pub use types::{RelayId, RequestRecord, ResponseRecord, UNKNOWN_LENGTH};
