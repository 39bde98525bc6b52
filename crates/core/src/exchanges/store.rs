//! Exchange storage trait.

use async_trait::async_trait;

use super::model::{Exchange, NewExchange};
use crate::errors::Result;
use crate::types::ExchangeId;

/// Storage interface for exchange reference data.
///
/// Mutations run through the storage layer's single writer and execute as one
/// atomic transaction each; reads go straight to the pool.
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// Inserts a new exchange, stamping both timestamps at write time.
    ///
    /// Fails with `DuplicateKey` when abbrev, name, or a non-null code
    /// already exists.
    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange>;

    /// Restamps `last_updated_date` after an administrative correction.
    async fn touch(&self, id: ExchangeId) -> Result<Exchange>;

    /// Deletes an exchange. Fails with `ReferentialConflict` while any asset
    /// still references it.
    async fn delete(&self, id: ExchangeId) -> Result<()>;

    fn get(&self, id: ExchangeId) -> Result<Exchange>;

    /// Resolves the commonly used abbreviation (e.g., "NYSE") to the row.
    fn get_by_abbrev(&self, abbrev: &str) -> Result<Exchange>;

    fn list(&self) -> Result<Vec<Exchange>>;
}
