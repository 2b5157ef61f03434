use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

/// A caller-supplied timestamp that may or may not carry a zone.
///
/// Naive values are assumed to already be wall-clock local to the
/// historian's configured zone; zoned values are converted to it.
#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    /// Wall-clock time with no zone attached.
    Naive(NaiveDateTime),
    /// An absolute instant with an explicit offset.
    Zoned(DateTime<FixedOffset>),
}

impl From<NaiveDateTime> for Timestamp {
    fn from(ts: NaiveDateTime) -> Self {
        Self::Naive(ts)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        Self::Zoned(ts)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Zoned(ts.fixed_offset())
    }
}

impl From<DateTime<Tz>> for Timestamp {
    fn from(ts: DateTime<Tz>) -> Self {
        Self::Zoned(ts.fixed_offset())
    }
}

/// Normalize a timestamp into the historian's zone.
///
/// Naive inputs get the zone attached, not converted: `08:30` naive becomes
/// `08:30` in `tz`. Zoned inputs keep their instant. Idempotent on values
/// already in `tz`.
pub fn normalize(ts: impl Into<Timestamp>, tz: Tz) -> DateTime<Tz> {
    match ts.into() {
        Timestamp::Naive(naive) => resolve_local(tz, naive),
        Timestamp::Zoned(zoned) => zoned.with_timezone(&tz),
    }
}

/// Render `ts` as the historian's backward-offset token, sampling `now`
/// fresh at call time.
///
/// The historian's query grammar only speaks in whole hours, so sub-hour
/// precision is dropped on the wire. Two calls straddling an hour boundary
/// can disagree for the same instant; that imprecision is part of the
/// contract, not something to smooth over here.
#[must_use]
pub fn offset_token(ts: DateTime<Tz>) -> String {
    let now = Utc::now().with_timezone(&ts.timezone());
    offset_token_at(ts, now)
}

/// Offset token for `ts` against an explicit `now` reference.
///
/// Truncates toward zero: 90 minutes ago is still `*-1h`. Zero and negative
/// (future) differences both render `*` — the grammar has no way to point
/// past "now".
#[must_use]
pub fn offset_token_at(ts: DateTime<Tz>, now: DateTime<Tz>) -> String {
    let hours = (now - ts).num_hours();
    if hours <= 0 {
        "*".to_owned()
    } else {
        format!("*-{hours}h")
    }
}

/// Start of the current operational period: yesterday's date at
/// `charge_start_hour:00:00.000` in `tz`. Used once, to seed the cache with
/// a day's worth of history at startup.
#[must_use]
pub fn charge_anchor(tz: Tz, charge_start_hour: u32) -> DateTime<Tz> {
    charge_anchor_at(tz, charge_start_hour, Utc::now().with_timezone(&tz))
}

/// Charge anchor against an explicit `now` reference.
#[must_use]
pub fn charge_anchor_at(tz: Tz, charge_start_hour: u32, now: DateTime<Tz>) -> DateTime<Tz> {
    let hour = charge_start_hour.min(23);
    let yesterday = now.date_naive() - Duration::days(1);
    let wall = yesterday
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| yesterday.and_time(NaiveTime::MIN));
    resolve_local(tz, wall)
}

/// Resolve a wall-clock time in `tz`.
///
/// DST fold: the earliest of the two mappings wins. DST gap: the time is
/// shifted forward out of the gap (real-world gaps are at most one hour).
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(ts) => ts,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}
