//! Async client for curl-relay.

mod client;

pub use client::{ClientError, RelayClient, RelayRequest, RelayResponse};
