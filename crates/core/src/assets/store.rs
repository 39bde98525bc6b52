//! Asset storage trait.

use async_trait::async_trait;

use super::model::{Asset, NewAsset};
use crate::errors::Result;
use crate::types::{AssetId, ExchangeId};

/// Storage interface for the asset catalog.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Inserts a new asset. Fails with `ReferentialConflict` when the
    /// exchange id does not resolve, and with `DuplicateKey` when the
    /// (exchange, symbol) pair already exists.
    async fn create(&self, new_asset: NewAsset) -> Result<Asset>;

    /// Deletes an asset. Fails with `ReferentialConflict` while price rows
    /// still reference it.
    async fn delete(&self, id: AssetId) -> Result<()>;

    fn get(&self, id: AssetId) -> Result<Asset>;

    /// All rows matching (exchange, symbol).
    ///
    /// The unique index keeps this at 0 or 1 rows for generation-2 stores;
    /// the service turns multiple matches into `AmbiguousLookup`.
    fn find_by_symbol(&self, exchange_id: ExchangeId, symbol: &str) -> Result<Vec<Asset>>;

    fn list(&self) -> Result<Vec<Asset>>;
}
