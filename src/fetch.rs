//! Transport layer: defines the source abstraction for arrival-list bodies
//! and the single-GET HTTP implementation behind it.
//!
//! The application runtime depends on the [`ArrivalsSource`] trait rather
//! than a concrete HTTP client, so tests can substitute a canned source for
//! any success or failure shape.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use thiserror::Error;

use crate::arrivals::ArrivalRecord;

/// How long the single network call may take before the run is abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fatal failure categories for the fetch/decode phase. Each renders as one
/// line naming the URL; none is retried. Per-record anomalies (a missing
/// field, one bad timestamp) never reach this enum — they degrade to
/// placeholders downstream.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Network error while fetching {url}: {detail}")]
    Network { url: String, detail: String },

    #[error("HTTP error {status} while fetching {url}: {reason}")]
    Status { url: String, status: u16, reason: String },

    #[error("Failed to parse JSON from {url}: {detail}")]
    Decode { url: String, detail: String },

    #[error("Unexpected error while fetching {url}: {detail}")]
    Unexpected { url: String, detail: String },
}

/// Generic source of raw arrival-list bodies.
///
/// The production implementor talks HTTP; tests use canned replies.
#[async_trait]
pub trait ArrivalsSource {
    /// Fetch the response body for `url`, classifying transport and HTTP
    /// status failures.
    async fn fetch_body(&self, url: &str) -> Result<String, FetchError>;
}

/// Concrete source issuing one GET with a fixed timeout.
pub struct HttpSource {
    timeout: Duration,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ArrivalsSource for HttpSource {
    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Unexpected {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        // text() decodes with the response's declared charset, UTF-8 default.
        response.text().await.map_err(|e| FetchError::Unexpected {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}

/// Fetch and decode the arrival list for one stop URL.
pub async fn fetch_arrivals<S: ArrivalsSource>(
    source: &S,
    url: &str,
) -> Result<Vec<ArrivalRecord>, FetchError> {
    let body = source.fetch_body(url).await?;
    let records: Vec<ArrivalRecord> =
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            detail: e.to_string(),
        })?;
    debug!("decoded {} arrival records from {url}", records.len());
    Ok(records)
}
