//! Exchange registry service.

use log::debug;
use std::sync::Arc;

use super::model::{Exchange, NewExchange};
use super::store::ExchangeStore;
use crate::errors::Result;
use crate::types::ExchangeId;

/// Service for registering and resolving exchanges.
pub struct ExchangeService {
    store: Arc<dyn ExchangeStore>,
}

impl ExchangeService {
    pub fn new(store: Arc<dyn ExchangeStore>) -> Self {
        Self { store }
    }

    /// Registers a new exchange after validating the payload.
    pub async fn register(&self, new_exchange: NewExchange) -> Result<Exchange> {
        new_exchange.validate()?;
        debug!("Registering exchange {}", new_exchange.abbrev);
        self.store.create(new_exchange).await
    }

    pub fn get(&self, id: ExchangeId) -> Result<Exchange> {
        self.store.get(id)
    }

    /// Resolves an exchange by its abbreviation, e.g. "NYSE".
    pub fn get_by_abbrev(&self, abbrev: &str) -> Result<Exchange> {
        self.store.get_by_abbrev(abbrev)
    }

    pub fn list(&self) -> Result<Vec<Exchange>> {
        self.store.list()
    }

    /// Restamps `last_updated_date` after an administrative correction.
    pub async fn touch(&self, id: ExchangeId) -> Result<Exchange> {
        self.store.touch(id).await
    }

    /// Deletes an exchange; fails with `ReferentialConflict` while assets
    /// reference it.
    pub async fn delete(&self, id: ExchangeId) -> Result<()> {
        self.store.delete(id).await
    }
}
