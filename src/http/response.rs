//! Reply encoding.
//!
//! Success is a JSON [`ResponseRecord`]; every [`RelayError`] becomes a
//! plain-text message with the status code of its kind:
//!
//! | kind             | status |
//! |------------------|--------|
//! | MethodNotAllowed | 405    |
//! | BadInput         | 400    |
//! | Execution        | 500    |
//! | Internal         | 500    |

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::relay::{RelayError, RelayResult, ResponseRecord};

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::BadInput(_) => StatusCode::BAD_REQUEST,
            RelayError::Execution(_) | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), format!("{}\n", self)).into_response()
    }
}

/// Encode a recorded outcome as the 200 reply body.
pub fn json_reply(record: &ResponseRecord) -> RelayResult<Response> {
    let body = serde_json::to_vec(record)
        .map_err(|e| RelayError::Internal(format!("error encoding response: {}", e)))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
