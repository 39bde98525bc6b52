//! Asset catalog service.

use log::debug;
use std::sync::Arc;

use super::model::{Asset, NewAsset};
use super::store::AssetStore;
use crate::errors::{Error, Result};
use crate::types::{AssetId, ExchangeId};

/// Service for onboarding instruments and resolving catalog keys.
pub struct AssetService {
    store: Arc<dyn AssetStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Onboards a new tradable instrument after validating the payload.
    pub async fn register(&self, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        debug!(
            "Registering asset {} on exchange {}",
            new_asset.symbol, new_asset.exchange_id
        );
        self.store.create(new_asset).await
    }

    pub fn get(&self, id: AssetId) -> Result<Asset> {
        self.store.get(id)
    }

    /// Resolves the catalog key (exchange, symbol) to an asset.
    ///
    /// This is the read an ingestion pipeline performs once per instrument
    /// before streaming bars. A store that predates the per-exchange symbol
    /// constraint can hold several matches; that case fails loudly with
    /// `AmbiguousLookup` rather than silently picking a row.
    pub fn lookup(&self, exchange_id: ExchangeId, symbol: &str) -> Result<Asset> {
        let mut matches = self.store.find_by_symbol(exchange_id, symbol)?;
        match matches.len() {
            0 => Err(Error::NotFound(format!(
                "asset '{}' on exchange {}",
                symbol, exchange_id
            ))),
            1 => Ok(matches.remove(0)),
            n => Err(Error::AmbiguousLookup(format!(
                "{} assets match '{}' on exchange {}",
                n, symbol, exchange_id
            ))),
        }
    }

    pub fn list(&self) -> Result<Vec<Asset>> {
        self.store.list()
    }

    /// All catalog symbols, for whole-universe ingestion runs.
    pub fn list_symbols(&self) -> Result<Vec<String>> {
        Ok(self.store.list()?.into_iter().map(|a| a.symbol).collect())
    }

    /// Retires an asset; fails with `ReferentialConflict` while price rows
    /// reference it.
    pub async fn delete(&self, id: AssetId) -> Result<()> {
        self.store.delete(id).await
    }
}
