//! Indigeneity catalogue client.
//!
//! The catalogue is consumed only through its query contract: one lookup per
//! agent IRI with a bounded timeout and a typed success/failure result.
//! Transport, auth and retry policy live here, outside the core.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use fairscore_core::IndigeneityStatus;

/// Environment variable holding the catalogue bearer token, when one is
/// required.
pub const CATALOGUE_TOKEN_ENV: &str = "FAIRSCORE_CATALOGUE_TOKEN";

/// Errors from a catalogue lookup.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("http request failed: {0}")]
    Http(String),

    #[error("catalogue returned status {status}")]
    Status { status: u16 },

    #[error("malformed catalogue response: {0}")]
    Parse(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// One catalogue answer for an agent IRI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntry {
    pub found: bool,
    #[serde(default)]
    pub indigeneity_status: Option<IndigeneityStatus>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Query contract for the indigeneity catalogue.
#[async_trait]
pub trait CatalogueClient: Send + Sync {
    /// Look up one agent IRI. A `found: false` entry is a definitive
    /// negative; an `Err` is a failure the caller must degrade around.
    async fn query(&self, iri: &str) -> Result<CatalogueEntry, CatalogueError>;

    /// Client name for logging.
    fn name(&self) -> &str;
}

/// HTTP catalogue client.
///
/// Performs `GET {base_url}/lookup?iri=...` expecting a JSON
/// [`CatalogueEntry`]. A 404 is treated as a definitive negative. Transient
/// failures (transport errors, 5xx) are retried a bounded number of times
/// with exponential backoff.
pub struct HttpCatalogue {
    base_url: String,
    token: Option<SecretString>,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpCatalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogue")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpCatalogue {
    pub fn new(base_url: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(5);
        Self {
            base_url: base_url.into(),
            token: None,
            timeout,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client builds with static configuration"),
        }
    }

    /// Set a bearer token. The token is stored as a secret and only exposed
    /// at the point of use.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client builds with static configuration");
        self
    }

    async fn query_once(&self, iri: &str) -> Result<CatalogueEntry, CatalogueError> {
        let mut request = self
            .client
            .get(format!("{}/lookup", self.base_url))
            .query(&[("iri", iri)])
            .header("accept", "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogueError::Timeout(self.timeout)
            } else {
                CatalogueError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(CatalogueEntry {
                found: false,
                indigeneity_status: None,
                display_name: None,
            });
        }
        if !status.is_success() {
            return Err(CatalogueError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<CatalogueEntry>()
            .await
            .map_err(|e| CatalogueError::Parse(e.to_string()))
    }
}

fn is_transient(error: &CatalogueError) -> bool {
    match error {
        CatalogueError::Http(_) | CatalogueError::Timeout(_) => true,
        CatalogueError::Status { status } => *status >= 500,
        CatalogueError::Parse(_) => false,
    }
}

#[async_trait]
impl CatalogueClient for HttpCatalogue {
    async fn query(&self, iri: &str) -> Result<CatalogueEntry, CatalogueError> {
        (|| self.query_once(iri))
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(is_transient)
            .notify(|err: &CatalogueError, dur: Duration| {
                tracing::warn!(error = %err, retry_in = ?dur, "catalogue lookup failed, retrying");
            })
            .await
    }

    fn name(&self) -> &str {
        "http-catalogue"
    }
}
