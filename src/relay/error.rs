//! Relay error taxonomy.

use thiserror::Error;

/// Every way a relay call can fail. Each kind maps to exactly one status code
/// at the HTTP boundary (see `http::response`).
#[derive(Debug, Error)]
pub enum RelayError {
    /// The endpoint was called with something other than POST.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The body could not be read or decoded as a request description.
    #[error("{0}")]
    BadInput(String),

    /// The outbound call could not be built or did not complete.
    #[error("{0}")]
    Execution(String),

    /// The reply could not be produced.
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::BadInput(_) => "bad_input",
            RelayError::Execution(_) => "execution_error",
            RelayError::Internal(_) => "internal_error",
        }
    }
}

/// Result alias for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
