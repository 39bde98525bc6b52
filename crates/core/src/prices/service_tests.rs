//! Tests for the price store contract: idempotent upsert, last-write-wins
//! overwrite, and inclusive ascending range queries.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

use super::model::{NewPriceBar, Ohlcv, PriceBar};
use super::service::PriceService;
use super::store::PriceStore;
use crate::errors::{Error, Result};
use crate::types::{AssetId, Day, VendorId};

/// In-memory PriceStore keyed by (day, asset), mirroring the composite
/// primary key semantics of the SQLite layer.
#[derive(Default)]
struct MockPriceStore {
    rows: Mutex<Vec<PriceBar>>,
}

impl MockPriceStore {
    fn apply(&self, bar: NewPriceBar) -> PriceBar {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        if let Some(existing) = rows
            .iter_mut()
            .find(|r| r.day == bar.day && r.asset_id == bar.asset_id)
        {
            existing.vendor_id = bar.vendor_id;
            existing.ohlcv = bar.ohlcv;
            existing.last_updated_date = now;
            return existing.clone();
        }
        let stored = PriceBar {
            day: bar.day,
            asset_id: bar.asset_id,
            vendor_id: bar.vendor_id,
            ohlcv: bar.ohlcv,
            created_date: now,
            last_updated_date: now,
        };
        rows.push(stored.clone());
        stored
    }
}

#[async_trait]
impl PriceStore for MockPriceStore {
    async fn upsert(&self, bar: NewPriceBar) -> Result<PriceBar> {
        Ok(self.apply(bar))
    }

    async fn upsert_batch(&self, bars: Vec<NewPriceBar>) -> Result<usize> {
        let count = bars.len();
        for bar in bars {
            self.apply(bar);
        }
        Ok(count)
    }

    fn range(&self, asset_id: AssetId, start: Day, end: Day) -> Result<Vec<PriceBar>> {
        let mut bars: Vec<PriceBar> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.asset_id == asset_id && r.day >= start && r.day <= end)
            .cloned()
            .collect();
        bars.sort_by_key(|r| r.day);
        Ok(bars)
    }

    fn latest(&self, asset_id: AssetId) -> Result<Option<PriceBar>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .max_by_key(|r| r.day)
            .cloned())
    }

    fn latest_day(&self, asset_id: AssetId) -> Result<Option<Day>> {
        Ok(self.latest(asset_id)?.map(|bar| bar.day))
    }
}

const VENDOR: VendorId = VendorId(1);
const AAPL: AssetId = AssetId(1);
const MSFT: AssetId = AssetId(2);

fn day(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd(y, m, d).unwrap()
}

fn service() -> (PriceService, Arc<MockPriceStore>) {
    let store = Arc::new(MockPriceStore::default());
    (PriceService::new(store.clone()), store)
}

#[tokio::test]
async fn upsert_is_idempotent_for_identical_inputs() {
    let (service, store) = service();
    let bar = Ohlcv::close_only(dec!(130.0));

    service
        .upsert_observation(VENDOR, AAPL, day(2023, 1, 3), bar)
        .await
        .unwrap();
    service
        .upsert_observation(VENDOR, AAPL, day(2023, 1, 3), bar)
        .await
        .unwrap();

    let rows = store.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ohlcv.close, Some(dec!(130.0)));
}

#[tokio::test]
async fn upsert_overwrites_in_place_without_a_second_row() {
    let (service, store) = service();
    let first = service
        .upsert_observation(VENDOR, AAPL, day(2023, 1, 3), Ohlcv::close_only(dec!(130.0)))
        .await
        .unwrap();

    let second_vendor = VendorId::new(2);
    let revised = service
        .upsert_observation(
            second_vendor,
            AAPL,
            day(2023, 1, 3),
            Ohlcv::close_only(dec!(131.5)),
        )
        .await
        .unwrap();

    assert_eq!(store.rows.lock().unwrap().len(), 1);
    assert_eq!(revised.ohlcv.close, Some(dec!(131.5)));
    // Last writer's vendor becomes the recorded provenance.
    assert_eq!(revised.vendor_id, second_vendor);
    assert_eq!(revised.created_date, first.created_date);
    assert!(revised.last_updated_date >= first.last_updated_date);
}

#[tokio::test]
async fn query_range_is_inclusive_ascending_and_per_asset() {
    let (service, _) = service();
    for (d, close) in [(3, dec!(130.0)), (5, dec!(132.0)), (4, dec!(131.0))] {
        service
            .upsert_observation(VENDOR, AAPL, day(2023, 1, d), Ohlcv::close_only(close))
            .await
            .unwrap();
    }
    service
        .upsert_observation(VENDOR, MSFT, day(2023, 1, 4), Ohlcv::close_only(dec!(240.0)))
        .await
        .unwrap();

    let bars = service
        .query_range(AAPL, day(2023, 1, 3), day(2023, 1, 4))
        .unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].day, day(2023, 1, 3));
    assert_eq!(bars[1].day, day(2023, 1, 4));
    assert!(bars.iter().all(|b| b.asset_id == AAPL));
}

#[tokio::test]
async fn query_range_returns_empty_when_no_data() {
    let (service, _) = service();
    let bars = service
        .query_range(AAPL, day(2023, 1, 1), day(2023, 1, 31))
        .unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn query_range_rejects_inverted_bounds() {
    let (service, _) = service();
    let err = service
        .query_range(AAPL, day(2023, 1, 5), day(2023, 1, 3))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn latest_date_tracks_most_recent_bar() {
    let (service, _) = service();
    assert_eq!(service.latest_date(AAPL).unwrap(), None);

    service
        .upsert_observation(VENDOR, AAPL, day(2023, 1, 3), Ohlcv::close_only(dec!(130.0)))
        .await
        .unwrap();
    service
        .upsert_observation(VENDOR, AAPL, day(2023, 1, 5), Ohlcv::close_only(dec!(132.0)))
        .await
        .unwrap();

    assert_eq!(service.latest_date(AAPL).unwrap(), Some(day(2023, 1, 5)));
    let latest = service.latest(AAPL).unwrap().unwrap();
    assert_eq!(latest.ohlcv.close, Some(dec!(132.0)));
}

#[tokio::test]
async fn batch_upsert_counts_rows_and_skips_empty_batches() {
    let (service, store) = service();
    assert_eq!(service.upsert_observations(Vec::new()).await.unwrap(), 0);

    let bars = vec![
        NewPriceBar {
            vendor_id: VENDOR,
            asset_id: AAPL,
            day: day(2023, 1, 3),
            ohlcv: Ohlcv::close_only(dec!(130.0)),
        },
        NewPriceBar {
            vendor_id: VENDOR,
            asset_id: AAPL,
            day: day(2023, 1, 4),
            ohlcv: Ohlcv::close_only(dec!(131.0)),
        },
    ];
    assert_eq!(service.upsert_observations(bars).await.unwrap(), 2);
    assert_eq!(store.rows.lock().unwrap().len(), 2);
}
