//! crucible-cache
//!
//! The time-range cache between the application and the historian.
//!
//! One instance owns one in-memory [`SeriesTable`] covering a contiguous
//! window. Every query extends that window by fetching only the uncovered
//! deltas, so a dashboard polling "the last day" every few seconds costs
//! near-zero marginal network traffic once the window stabilizes. Rows
//! falling behind the retention horizon are trimmed after every query.
//!
//! The cache is an explicitly constructed service: build it once with
//! [`RangeCache::initialize`], share it behind an `Arc`, and pass it to
//! consumers. There is no process-wide global.
#![warn(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::Mutex;

use crucible_core::time::{Timestamp, charge_anchor_at, normalize};
use crucible_core::{CacheConfig, CrucibleError, HistorianSource, SeriesTable};

/// Range cache over a single historian source.
///
/// `get` is the only mutator. The whole decide/fetch/merge/slice/evict
/// sequence runs under one async lock, so concurrent callers observe fully
/// serialized merges; a slow historian fetch therefore serializes callers
/// for up to the configured request timeout, exactly as the original
/// single-owner design implies.
pub struct RangeCache {
    source: Arc<dyn HistorianSource>,
    timezone: Tz,
    retention: chrono::Duration,
    table: Mutex<SeriesTable>,
}

impl RangeCache {
    /// Create the cache and seed it with one bootstrap fetch covering
    /// "yesterday at the charge start hour" through now.
    ///
    /// A failed bootstrap fetch seeds an empty cache; the first `get` will
    /// then fetch its full window.
    pub async fn initialize(source: Arc<dyn HistorianSource>, cfg: &CacheConfig) -> Self {
        let now = zoned_now(cfg.timezone);
        let anchor = charge_anchor_at(cfg.timezone, cfg.charge_start_hour, now);
        let table = source.recorded(anchor, now).await;
        tracing::info!(rows = table.len(), %anchor, "seeded historian cache");
        Self {
            source,
            timezone: cfg.timezone,
            retention: cfg.retention(),
            table: Mutex::new(table),
        }
    }

    /// Recorded data for `[start, end]` inclusive, served through the cache.
    ///
    /// Naive bounds are assumed local to the historian zone. Sub-ranges
    /// already covered are answered from memory; only the uncovered deltas
    /// hit the network, one fetch per side at most. After the response slice
    /// is taken, rows older than the retention horizon are evicted — the
    /// slice keeps any row it already selected.
    ///
    /// # Errors
    /// `CrucibleError::InvalidRange` when `start` is after `end`. Historian
    /// failures are not errors: the affected sub-range is simply empty.
    pub async fn get(
        &self,
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
    ) -> Result<SeriesTable, CrucibleError> {
        let start = normalize(start, self.timezone);
        let end = normalize(end, self.timezone);
        if start > end {
            return Err(CrucibleError::InvalidRange { start, end });
        }

        let mut table = self.table.lock().await;

        let Some((cached_min, cached_max)) = table.bounds() else {
            *table = self.source.recorded(start, end).await;
            tracing::debug!(rows = table.len(), "cache was empty, stored full window");
            return Ok(table.clone());
        };

        if start < cached_min {
            let left = self.source.recorded(start, cached_min).await;
            tracing::debug!(rows = left.len(), %start, %cached_min, "extended cache left");
            table.merge(left);
        }
        if end > cached_max {
            let right = self.source.recorded(cached_max, end).await;
            tracing::debug!(rows = right.len(), %cached_max, %end, "extended cache right");
            table.merge(right);
        }

        let response = table.slice(start, end);

        let cutoff = zoned_now(self.timezone) - self.retention;
        let dropped = table.evict_before(cutoff);
        if dropped > 0 {
            tracing::debug!(dropped, %cutoff, "evicted rows past retention horizon");
        }

        Ok(response)
    }

    /// Owned copy of the full cached table, post-eviction.
    pub async fn snapshot(&self) -> SeriesTable {
        self.table.lock().await.clone()
    }
}

fn zoned_now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}
