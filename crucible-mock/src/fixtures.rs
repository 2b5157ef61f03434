use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use crucible_core::SeriesTable;

/// Channel name used by the fixture series.
pub const CELOX_O2: &str = "ACTUAL_CELOX_O2";

/// A Celox O2 ppm series ending at `end`: `points` samples spaced
/// `step_minutes` apart, values ramping through a plausible ppm band.
#[must_use]
pub fn celox_series(end: DateTime<Tz>, points: usize, step_minutes: i64) -> SeriesTable {
    let mut table = SeriesTable::new();
    for i in 0..points {
        let back = i64::try_from(points - 1 - i).unwrap_or(i64::MAX);
        let ts = end - Duration::minutes(back * step_minutes);
        let value = 450.0 + ((i % 100) as f64) * 10.0;
        table.insert(ts, CELOX_O2, Some(value));
    }
    table
}
