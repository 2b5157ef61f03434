//! crucible-pi
//!
//! PI Web API connector implementing [`HistorianSource`] on top of `reqwest`.
//!
//! One fetch is one authenticated GET against the `streamsets/recorded`
//! endpoint; the window travels as the historian's relative-offset tokens
//! (`*`, `*-3h`). There is no retry, no backoff, and no caller-visible
//! failure: every error degrades to an empty table (fail-open), so the
//! dashboard keeps rendering through a historian outage. The `warn!` line
//! carrying the [`FetchError`] is the only place an outage is
//! distinguishable from a genuinely empty range.
#![warn(missing_docs)]

mod wire;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use crucible_core::time::offset_token;
use crucible_core::{Channel, CrucibleError, HistorianConfig, HistorianSource, SeriesTable};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Path of the recorded-values endpoint, relative to the base URL.
const RECORDED_ENDPOINT: &str = "piwebapi/streamsets/recorded";

/// Connector-internal failure taxonomy. Logged, never returned to callers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The historian answered with a non-success status.
    #[error("historian returned status {status}")]
    Status {
        /// The non-success status code.
        status: StatusCode,
    },
    /// The request could not be sent, or timed out.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body was not the expected streamsets envelope.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// HTTP client for one PI Web API historian.
///
/// Stateless per call: the connector owns no data beyond its configuration
/// and never mutates any cache.
pub struct PiConnector {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    password: String,
    timezone: Tz,
    channels: Vec<Channel>,
}

impl PiConnector {
    /// Build a connector from a validated configuration.
    ///
    /// The request timeout and TLS policy are fixed at construction; the
    /// original per-call `verify_cert` switch lives in
    /// [`HistorianConfig::verify_cert`] instead.
    ///
    /// # Errors
    /// `CrucibleError::Config` when the configuration is incomplete, the
    /// base URL does not parse, or the HTTP client cannot be built.
    pub fn from_config(cfg: &HistorianConfig) -> Result<Self, CrucibleError> {
        cfg.validate()?;
        let base = cfg.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/{RECORDED_ENDPOINT}"))
            .map_err(|e| CrucibleError::config(format!("base_url is not a valid URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .danger_accept_invalid_certs(!cfg.verify_cert)
            .build()
            .map_err(|e| CrucibleError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint,
            username: cfg.username.clone(),
            password: cfg.password.clone(),
            timezone: cfg.timezone,
            channels: cfg.channels.clone(),
        })
    }

    /// Single recorded-values request; the caller decides what a failure
    /// means.
    async fn try_recorded(
        &self,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<SeriesTable, FetchError> {
        let mut params: Vec<(&str, String)> = self
            .channels
            .iter()
            .map(|c| ("webid", c.web_id.clone()))
            .collect();
        params.push(("startTime", offset_token(start)));
        params.push(("endTime", offset_token(end)));

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&params)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        let envelope: wire::StreamSets =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(wire::into_table(envelope, self.timezone))
    }
}

#[async_trait]
impl HistorianSource for PiConnector {
    async fn recorded(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> SeriesTable {
        match self.try_recorded(start, end).await {
            Ok(table) => {
                tracing::debug!(rows = table.len(), %start, %end, "historian fetch complete");
                table
            }
            Err(err) => {
                tracing::warn!(%err, %start, %end, "historian fetch failed, returning empty table");
                SeriesTable::default()
            }
        }
    }
}
