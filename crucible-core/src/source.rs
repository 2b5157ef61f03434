use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::table::SeriesTable;

/// Produces recorded values for the full configured channel set over an
/// explicit window.
///
/// Implementations are fail-open: an outage, timeout, or malformed response
/// yields an empty table, never an error. The wire connector logs the cause;
/// callers cannot (and by design need not) distinguish "historian down"
/// from "no data in range".
#[async_trait]
pub trait HistorianSource: Send + Sync {
    /// Fetch recorded values for every configured channel in `[start, end]`.
    async fn recorded(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> SeriesTable;
}
