//! Serde shapes for the PI Web API streamsets envelope.
//!
//! Every field is optional: the historian omits fields freely, and a missing
//! field must become `None`, never a decode failure.

use chrono::DateTime;
use chrono_tz::Tz;
use crucible_core::SeriesTable;
use serde::Deserialize;

/// Top-level response: one entry per requested stream.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamSets {
    #[serde(rename = "Items", default)]
    pub items: Vec<StreamValues>,
}

/// One stream's recorded values.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamValues {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Items", default)]
    pub items: Vec<RecordedValue>,
}

/// A single timestamped reading.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecordedValue {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<serde_json::Value>,
}

/// Flatten the envelope into a series table in the historian's zone.
///
/// The row index is the union of every stream's timestamps. Values survive
/// only when numeric; PI digital states and error markers arrive as objects
/// or strings and become `None`. An unparsable timestamp drops that sample,
/// not the fetch.
pub(crate) fn into_table(envelope: StreamSets, tz: Tz) -> SeriesTable {
    let mut table = SeriesTable::new();
    for stream in envelope.items {
        let Some(name) = stream.name else {
            tracing::debug!("skipping unnamed stream in historian response");
            continue;
        };
        for entry in stream.items {
            let Some(raw_ts) = entry.timestamp else {
                continue;
            };
            let Ok(ts) = DateTime::parse_from_rfc3339(&raw_ts) else {
                tracing::debug!(channel = %name, raw = %raw_ts, "skipping sample with unparsable timestamp");
                continue;
            };
            let value = entry.value.as_ref().and_then(serde_json::Value::as_f64);
            table.insert(ts.with_timezone(&tz), name.clone(), value);
        }
    }
    table
}
