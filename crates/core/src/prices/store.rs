//! Price storage trait.

use async_trait::async_trait;

use super::model::{NewPriceBar, PriceBar};
use crate::errors::Result;
use crate::types::{AssetId, Day};

/// Storage interface for end-of-day price bars.
///
/// The composite key (day, asset) is globally unique: writing a bar that
/// already exists overwrites its price fields, vendor provenance, and
/// last-modified timestamp in place. `created_date` survives overwrites.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Inserts or overwrites the bar for (day, asset). Last write wins.
    ///
    /// Fails with `ReferentialConflict` when the asset or vendor id does not
    /// resolve.
    async fn upsert(&self, bar: NewPriceBar) -> Result<PriceBar>;

    /// Upserts a batch of bars inside one transaction.
    ///
    /// Returns the number of rows written. Re-running the same batch with
    /// identical inputs leaves the store in the same observable state.
    async fn upsert_batch(&self, bars: Vec<NewPriceBar>) -> Result<usize>;

    /// Bars for one asset with `start <= day <= end`, ascending by day.
    /// Empty when no data exists in range.
    fn range(&self, asset_id: AssetId, start: Day, end: Day) -> Result<Vec<PriceBar>>;

    /// The most recent bar for an asset, if any.
    fn latest(&self, asset_id: AssetId) -> Result<Option<PriceBar>>;

    /// The most recent stored day for an asset. Ingestion resumes from the
    /// day after this.
    fn latest_day(&self, asset_id: AssetId) -> Result<Option<Day>>;
}
