use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// One row's readings: channel name to an optional numeric value.
///
/// Sparse by design. A channel the historian returned nothing for at this
/// timestamp is absent; a channel that reported a non-numeric state (digital
/// states, error markers) is present as `None`.
pub type ChannelValues = BTreeMap<String, Option<f64>>;

/// An ordered sequence of samples keyed by timestamp.
///
/// Backing the table with a `BTreeMap` makes the structural invariants hold
/// by construction: timestamps are unique and strictly increasing, and a
/// merge can never interleave rows out of order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesTable {
    rows: BTreeMap<DateTime<Tz>, ChannelValues>,
}

impl SeriesTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (distinct timestamps).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Minimum and maximum timestamp, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let min = self.rows.keys().next()?;
        let max = self.rows.keys().next_back()?;
        Some((*min, *max))
    }

    /// Set one channel's value at `ts`, creating the row if needed.
    pub fn insert(&mut self, ts: DateTime<Tz>, channel: impl Into<String>, value: Option<f64>) {
        self.rows.entry(ts).or_default().insert(channel.into(), value);
    }

    /// Merge `other` into `self`.
    ///
    /// On an exact-timestamp collision the row from `other` wins: the later
    /// fetch is authoritative for that instant. No deduplication beyond
    /// exact-timestamp equality is attempted.
    pub fn merge(&mut self, other: SeriesTable) {
        self.rows.extend(other.rows);
    }

    /// Owned copy of every row with timestamp in `[start, end]` inclusive.
    #[must_use]
    pub fn slice(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> SeriesTable {
        if start > end {
            return SeriesTable::new();
        }
        SeriesTable {
            rows: self
                .rows
                .range(start..=end)
                .map(|(ts, values)| (*ts, values.clone()))
                .collect(),
        }
    }

    /// Drop every row strictly older than `cutoff`; returns the dropped count.
    pub fn evict_before(&mut self, cutoff: DateTime<Tz>) -> usize {
        let kept = self.rows.split_off(&cutoff);
        let dropped = self.rows.len();
        self.rows = kept;
        dropped
    }

    /// Value of `channel` at `ts`.
    ///
    /// `None` when the row or column is absent; `Some(None)` when the
    /// historian reported a non-numeric state at that instant.
    #[must_use]
    pub fn value(&self, ts: DateTime<Tz>, channel: &str) -> Option<Option<f64>> {
        self.rows.get(&ts).and_then(|row| row.get(channel).copied())
    }

    /// Iterate rows in timestamp order.
    pub fn rows(&self) -> impl Iterator<Item = (&DateTime<Tz>, &ChannelValues)> {
        self.rows.iter()
    }

    /// Iterate timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = &DateTime<Tz>> {
        self.rows.keys()
    }
}
