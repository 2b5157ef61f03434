//! crucible-core
//!
//! Core types and helpers shared across the crucible historian data layer.
//!
//! - `channel`: logical channel names and their historian WebID mapping.
//! - `config`: connector and cache configuration surfaces.
//! - `table`: the ordered, time-indexed series table the range cache owns.
//! - `time`: timestamp normalization, the historian's relative-offset query
//!   grammar, and the charge anchor.
//! - `source`: the `HistorianSource` trait implemented by the wire connector
//!   and by test doubles.
//!
//! All timestamps that cross a public API boundary are `DateTime<Tz>` in the
//! historian's configured zone; callers may hand in naive wall-clock values,
//! which are assumed to already be local to that zone (see [`time::normalize`]).
#![warn(missing_docs)]

/// Logical measurement channels and their historian identifiers.
pub mod channel;
/// Configuration surfaces for the connector and the range cache.
pub mod config;
mod error;
/// The seam between the range cache and whatever produces historian data.
pub mod source;
/// The ordered, time-indexed table the range cache owns.
pub mod table;
/// Timestamp normalization and the historian's offset-token grammar.
pub mod time;

pub use channel::Channel;
pub use config::{CacheConfig, HistorianConfig};
pub use error::CrucibleError;
pub use source::HistorianSource;
pub use table::{ChannelValues, SeriesTable};
pub use time::Timestamp;
