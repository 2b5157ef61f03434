use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use crucible_cache::RangeCache;
use crucible_core::{CacheConfig, SeriesTable};
use crucible_mock::{MockHistorian, fixtures};

const TZ: Tz = chrono_tz::Europe::Berlin;

fn zoned_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&TZ)
}

fn table_between(start: DateTime<Tz>, end: DateTime<Tz>) -> SeriesTable {
    let mut table = SeriesTable::new();
    let mut ts = start;
    while ts <= end {
        table.insert(ts, fixtures::CELOX_O2, Some(512.0));
        ts += Duration::minutes(30);
    }
    table
}

#[tokio::test]
async fn failed_gap_fill_leaves_cached_rows_intact() {
    let now = zoned_now();
    let source = Arc::new(MockHistorian::new());
    let cached = table_between(now - Duration::hours(6), now - Duration::hours(1));
    source.push_response(cached.clone());
    let cache = RangeCache::initialize(source.clone(), &CacheConfig::default()).await;

    // no scripted response left: the left extension comes back empty,
    // exactly like the connector during a historian outage
    let got = cache
        .get(now - Duration::hours(12), now - Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(source.call_count(), 2, "the gap fill was attempted");
    assert_eq!(got, cached, "only the pre-existing rows are returned");
    assert_eq!(cache.snapshot().await, cached, "cached rows were not corrupted");
}

#[tokio::test]
async fn failed_bootstrap_degrades_to_an_empty_cache() {
    let source = Arc::new(MockHistorian::new());
    let cache = RangeCache::initialize(source.clone(), &CacheConfig::default()).await;

    assert_eq!(source.call_count(), 1);
    assert!(cache.snapshot().await.is_empty());
}

#[tokio::test]
async fn outage_on_an_empty_cache_returns_an_empty_table_not_an_error() {
    let now = zoned_now();
    let source = Arc::new(MockHistorian::new());
    let cache = RangeCache::initialize(source.clone(), &CacheConfig::default()).await;

    let got = cache.get(now - Duration::hours(2), now).await.unwrap();

    assert!(got.is_empty());
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn recovery_after_an_outage_fills_the_window_on_the_next_query() {
    let now = zoned_now();
    let source = Arc::new(MockHistorian::new());
    let cache = RangeCache::initialize(source.clone(), &CacheConfig::default()).await;

    // outage: nothing scripted
    let empty = cache.get(now - Duration::hours(2), now).await.unwrap();
    assert!(empty.is_empty());

    // historian back up: the cache is still empty, so the same window is
    // fetched in full rather than assumed covered
    source.push_response(table_between(now - Duration::hours(2), now));
    let got = cache.get(now - Duration::hours(2), now).await.unwrap();

    assert!(!got.is_empty());
    assert_eq!(source.call_count(), 3);
}
