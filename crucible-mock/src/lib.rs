//! crucible-mock
//!
//! Scripted in-memory [`HistorianSource`] for CI-safe tests: no network, a
//! deterministic response queue, and a record of every requested window.
#![warn(missing_docs)]

/// Deterministic series for tests and offline development.
pub mod fixtures;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use crucible_core::{HistorianSource, SeriesTable};

/// Scripted historian double.
///
/// Each `recorded` call pops the next scripted table; an exhausted queue
/// yields empty tables, which doubles as the simplest outage simulation —
/// the real connector is fail-open and degrades exactly the same way.
#[derive(Default)]
pub struct MockHistorian {
    responses: Mutex<VecDeque<SeriesTable>>,
    calls: Mutex<Vec<(DateTime<Tz>, DateTime<Tz>)>>,
}

impl MockHistorian {
    /// A mock with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `table` as the response to the next unanswered fetch.
    pub fn push_response(&self, table: SeriesTable) {
        self.responses
            .lock()
            .expect("mock script lock")
            .push_back(table);
    }

    /// Windows requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(DateTime<Tz>, DateTime<Tz>)> {
        self.calls.lock().expect("mock call log lock").clone()
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log lock").len()
    }
}

#[async_trait]
impl HistorianSource for MockHistorian {
    async fn recorded(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> SeriesTable {
        self.calls
            .lock()
            .expect("mock call log lock")
            .push((start, end));
        self.responses
            .lock()
            .expect("mock script lock")
            .pop_front()
            .unwrap_or_default()
    }
}
