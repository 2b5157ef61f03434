use chrono::DateTime;
use chrono_tz::Tz;
use crucible_core::SeriesTable;
use proptest::prelude::*;

const TZ: Tz = chrono_tz::Europe::Berlin;
const CHANNEL: &str = "ACTUAL_CELOX_O2";

fn arb_ts() -> impl Strategy<Value = DateTime<Tz>> {
    (0i64..2_000_000_000i64)
        .prop_map(|s| DateTime::from_timestamp(s, 0).unwrap().with_timezone(&TZ))
}

fn arb_table() -> impl Strategy<Value = SeriesTable> {
    proptest::collection::vec(
        (arb_ts(), proptest::option::of(0.0f64..20_000.0)),
        0..60,
    )
    .prop_map(|entries| {
        let mut table = SeriesTable::new();
        for (ts, value) in entries {
            table.insert(ts, CHANNEL, value);
        }
        table
    })
}

proptest! {
    #[test]
    fn merge_keeps_timestamps_strictly_increasing(a in arb_table(), b in arb_table()) {
        let mut merged = a.clone();
        merged.merge(b);
        let ts: Vec<_> = merged.timestamps().copied().collect();
        for pair in ts.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn later_fetch_wins_on_timestamp_collision(a in arb_table(), b in arb_table()) {
        let mut merged = a.clone();
        merged.merge(b.clone());
        for (ts, row) in b.rows() {
            prop_assert_eq!(merged.value(*ts, CHANNEL), row.get(CHANNEL).copied());
        }
    }

    #[test]
    fn merge_never_loses_a_timestamp(a in arb_table(), b in arb_table()) {
        let mut merged = a.clone();
        merged.merge(b.clone());
        for (ts, _) in a.rows() {
            prop_assert!(merged.value(*ts, CHANNEL).is_some());
        }
        for (ts, _) in b.rows() {
            prop_assert!(merged.value(*ts, CHANNEL).is_some());
        }
    }

    #[test]
    fn slice_is_inclusive_and_complete(t in arb_table(), lo in arb_ts(), hi in arb_ts()) {
        let (start, end) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let slice = t.slice(start, end);
        for (ts, _) in slice.rows() {
            prop_assert!(*ts >= start && *ts <= end);
        }
        let expected = t.rows().filter(|(ts, _)| **ts >= start && **ts <= end).count();
        prop_assert_eq!(slice.len(), expected);
    }

    #[test]
    fn evict_drops_exactly_the_rows_before_the_cutoff(t in arb_table(), cutoff in arb_ts()) {
        let mut evicted = t.clone();
        let dropped = evicted.evict_before(cutoff);
        prop_assert_eq!(dropped + evicted.len(), t.len());
        for (ts, _) in evicted.rows() {
            prop_assert!(*ts >= cutoff);
        }
        for (ts, row) in t.rows() {
            if *ts >= cutoff {
                prop_assert_eq!(evicted.value(*ts, CHANNEL), row.get(CHANNEL).copied());
            }
        }
    }
}
