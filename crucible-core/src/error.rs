use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

/// Unified caller-facing error type for the crucible workspace.
///
/// Historian and network failures never appear here: the connector is
/// fail-open and degrades to an empty table (see `crucible-pi`). Only
/// conditions the caller caused and can correct are surfaced.
#[derive(Debug, Error)]
pub enum CrucibleError {
    /// Invalid or incomplete configuration, detected before any network
    /// activity.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The requested window has `start` after `end`.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Normalized start bound of the rejected window.
        start: DateTime<Tz>,
        /// Normalized end bound of the rejected window.
        end: DateTime<Tz>,
    },
}

impl CrucibleError {
    /// Helper: build a `Config` error from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
