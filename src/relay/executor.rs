//! Outbound executor.
//!
//! # Responsibilities
//! - Turn a [`RequestRecord`] into one outbound HTTP call
//! - Flatten the origin's reply into a [`ResponseRecord`]
//!
//! # Design Decisions
//! - Construction and transport failures share one error kind
//! - Only the first value of a repeated response header is kept
//! - `Transfer-Encoding` is framing, not a reported header
//! - Length comes from the headers alone, never from the received body
//! - Redirects follow the client default (10 hops) and cannot be overridden per call
//! - The response body is never read

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, TRANSFER_ENCODING};
use reqwest::{Client, Method, Request, Response, StatusCode};
use url::Url;

use crate::config::OutboundConfig;
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::types::{RelayId, RequestRecord, ResponseRecord, UNKNOWN_LENGTH};

/// Performs relayed calls against external origins.
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Build the shared outbound client.
    pub fn new(config: &OutboundConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Execute the described call and summarize the origin's reply.
    pub async fn execute(&self, id: RelayId, record: &RequestRecord) -> RelayResult<ResponseRecord> {
        let request = build_request(record)?;
        let start = Instant::now();

        let result = self.client.execute(request).await;
        metrics::record_outbound(start, result.is_ok());

        let response = result.map_err(|e| {
            RelayError::Execution(format!("error sending request to the service: {}", error_chain(&e)))
        })?;

        Ok(summarize(id, &response))
    }
}

/// Build the outbound request. Every caller header replaces any default of
/// the same name.
pub fn build_request(record: &RequestRecord) -> RelayResult<Request> {
    let method = if record.method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(record.method.as_bytes())
            .map_err(|e| creating(format!("invalid method {:?}: {}", record.method, e)))?
    };

    let url = Url::parse(&record.url)
        .map_err(|e| creating(format!("parse {:?}: {}", record.url, e)))?;

    let mut headers = HeaderMap::with_capacity(record.headers.len());
    for (name, value) in &record.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| creating(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| creating(format!("invalid value for header {:?}: {}", name.as_str(), e)))?;
        headers.insert(name, value);
    }

    let mut request = Request::new(method, url);
    *request.headers_mut() = headers;
    Ok(request)
}

fn creating(detail: String) -> RelayError {
    RelayError::Execution(format!("error creating request to the service: {}", detail))
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn summarize(id: RelayId, response: &Response) -> ResponseRecord {
    ResponseRecord {
        id,
        status: response.status().as_u16(),
        headers: flatten_headers(response.headers()),
        length: content_length(response.status(), response.headers()),
    }
}

/// Collapse a multi-valued header map to its first value per name.
/// `Transfer-Encoding` is left out.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .filter(|name| *name != TRANSFER_ENCODING)
        .filter_map(|name| {
            headers.get(name).map(|value| {
                (
                    canonical_header_name(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
        })
        .collect()
}

/// Length the origin declared for the reply.
///
/// Chunked replies are unknown. Otherwise a valid `Content-Length` wins;
/// without one, statuses that never carry a body (1xx, 204, 304) are 0 and
/// everything else is unknown.
pub fn content_length(status: StatusCode, headers: &HeaderMap) -> i64 {
    let chunked = headers
        .get_all(TRANSFER_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.to_ascii_lowercase().contains("chunked"));
    if chunked {
        return UNKNOWN_LENGTH;
    }

    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 0);

    match declared {
        Some(n) => n,
        None if status.is_informational()
            || status == StatusCode::NO_CONTENT
            || status == StatusCode::NOT_MODIFIED =>
        {
            0
        }
        None => UNKNOWN_LENGTH,
    }
}

/// MIME canonical form: first letter and every letter after a hyphen upper
/// case, the rest lower case. Names with characters outside `[A-Za-z0-9-]`
/// are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() };
            upper = c == '-';
            out
        })
        .collect()
}
