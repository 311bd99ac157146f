//! Relay call types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier correlating a [`RequestRecord`] with its [`ResponseRecord`].
pub type RelayId = u64;

/// A caller-submitted description of one outbound HTTP call.
///
/// Missing or `null` fields decode to empty values and unknown fields are
/// ignored. An empty method is sent as `GET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestRecord {
    /// HTTP method token, e.g. "GET".
    #[serde(deserialize_with = "null_as_empty")]
    pub method: String,
    /// Absolute target URL.
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
    /// Headers to set on the outbound call, one value per name.
    #[serde(deserialize_with = "null_as_empty")]
    pub headers: BTreeMap<String, String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Summary of the origin's reply to one relayed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: RelayId,
    pub status: u16,
    /// First value of each response header, keyed by canonical name.
    pub headers: BTreeMap<String, String>,
    /// Content length reported by the origin, `-1` when unknown.
    pub length: i64,
}

/// Content length sentinel for "unknown".
pub const UNKNOWN_LENGTH: i64 = -1;
