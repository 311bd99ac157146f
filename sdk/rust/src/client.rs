use std::collections::BTreeMap;
use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Description of one call for the relay to perform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl RelayRequest {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            headers: BTreeMap::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

/// Summary the relay returns for a completed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub id: u64,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub length: i64,
}

#[derive(Debug)]
pub enum ClientError {
    /// The relay could not be reached.
    Http(reqwest::Error),
    /// The relay answered with a non-200 status and a text message.
    Status { status: u16, message: String },
    /// The relay's 200 body was not a valid summary.
    Decode(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "HTTP error: {}", e),
            ClientError::Status { status, message } => {
                write!(f, "relay returned {}: {}", status, message.trim_end())
            }
            ClientError::Decode(e) => write!(f, "invalid relay reply: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

pub struct RelayClient {
    client: Client,
    base_url: String,
    path: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (e.g. with proxies disabled).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: "/curl".to_string(),
        }
    }

    /// Target a relay mounted on a non-default path.
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Ask the relay to perform `req`.
    pub async fn relay(&self, req: &RelayRequest) -> Result<RelayResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, self.path))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(ClientError::Decode)
    }

    /// Fetch one journal entry from the admin surface as raw JSON.
    pub async fn entry(&self, id: u64) -> Result<Option<serde_json::Value>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/admin/entries/{}", self.base_url, id))
            .send()
            .await?;

        match resp.status().as_u16() {
            404 => Ok(None),
            200 => Ok(Some(resp.json().await?)),
            status => Err(ClientError::Status {
                status,
                message: resp.text().await?,
            }),
        }
    }

    /// Fetch journal counters from the admin surface.
    pub async fn status(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .client
            .get(format!("{}/admin/status", self.base_url))
            .send()
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }
}
