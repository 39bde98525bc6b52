//! Price store service.

use log::debug;
use std::sync::Arc;

use super::model::{NewPriceBar, Ohlcv, PriceBar};
use super::store::PriceStore;
use crate::errors::{Error, Result};
use crate::types::{AssetId, Day, VendorId};

/// Service for ingesting and querying end-of-day bars.
pub struct PriceService {
    store: Arc<dyn PriceStore>,
}

impl PriceService {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        Self { store }
    }

    /// Writes one observation with last-write-wins semantics on the
    /// (day, asset) key. Idempotent for identical inputs.
    pub async fn upsert_observation(
        &self,
        vendor_id: VendorId,
        asset_id: AssetId,
        day: Day,
        ohlcv: Ohlcv,
    ) -> Result<PriceBar> {
        debug!("Upserting bar for asset {} on {}", asset_id, day);
        self.store
            .upsert(NewPriceBar {
                vendor_id,
                asset_id,
                day,
                ohlcv,
            })
            .await
    }

    /// Writes a whole ingestion batch in one transaction.
    pub async fn upsert_observations(&self, bars: Vec<NewPriceBar>) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }
        self.store.upsert_batch(bars).await
    }

    /// Bars for `asset_id` with `start <= day <= end`, ascending by day.
    ///
    /// An empty range of data is an empty vec, not an error; an inverted
    /// range is a caller mistake.
    pub fn query_range(&self, asset_id: AssetId, start: Day, end: Day) -> Result<Vec<PriceBar>> {
        if start > end {
            return Err(Error::InvalidInput(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }
        self.store.range(asset_id, start, end)
    }

    /// The most recent bar for an asset, if any.
    pub fn latest(&self, asset_id: AssetId) -> Result<Option<PriceBar>> {
        self.store.latest(asset_id)
    }

    /// The most recent stored day for an asset; ingestion resumes from the
    /// day after.
    pub fn latest_date(&self, asset_id: AssetId) -> Result<Option<Day>> {
        self.store.latest_day(asset_id)
    }
}
