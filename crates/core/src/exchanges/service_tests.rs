//! Tests for the exchange registry contract.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use super::model::{Exchange, NewExchange};
use super::service::ExchangeService;
use super::store::ExchangeStore;
use crate::errors::{Error, Result};
use crate::types::ExchangeId;

/// In-memory ExchangeStore that enforces the uniqueness invariants the
/// SQLite schema enforces in production.
#[derive(Default)]
struct MockExchangeStore {
    rows: Mutex<Vec<Exchange>>,
    referenced: Mutex<Vec<ExchangeId>>,
}

impl MockExchangeStore {
    fn mark_referenced(&self, id: ExchangeId) {
        self.referenced.lock().unwrap().push(id);
    }
}

#[async_trait]
impl ExchangeStore for MockExchangeStore {
    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange> {
        let mut rows = self.rows.lock().unwrap();
        let duplicate = rows.iter().any(|e| {
            e.abbrev == new_exchange.abbrev
                || e.name == new_exchange.name
                || (e.code.is_some() && e.code == new_exchange.code)
        });
        if duplicate {
            return Err(Error::DuplicateKey(new_exchange.abbrev));
        }
        let now = Utc::now();
        let exchange = Exchange {
            id: ExchangeId::new(rows.len() as i64 + 1),
            abbrev: new_exchange.abbrev,
            name: new_exchange.name,
            code: new_exchange.code,
            timezone: new_exchange.timezone,
            created_date: now,
            last_updated_date: now,
        };
        rows.push(exchange.clone());
        Ok(exchange)
    }

    async fn touch(&self, id: ExchangeId) -> Result<Exchange> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("exchange {}", id)))?;
        row.last_updated_date = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: ExchangeId) -> Result<()> {
        if self.referenced.lock().unwrap().contains(&id) {
            return Err(Error::ReferentialConflict(format!(
                "exchange {} is referenced by assets",
                id
            )));
        }
        self.rows.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    fn get(&self, id: ExchangeId) -> Result<Exchange> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("exchange {}", id)))
    }

    fn get_by_abbrev(&self, abbrev: &str) -> Result<Exchange> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.abbrev == abbrev)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("exchange '{}'", abbrev)))
    }

    fn list(&self) -> Result<Vec<Exchange>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

fn service() -> (ExchangeService, Arc<MockExchangeStore>) {
    let store = Arc::new(MockExchangeStore::default());
    (ExchangeService::new(store.clone()), store)
}

#[tokio::test]
async fn register_rejects_duplicate_abbrev() {
    let (service, _) = service();
    service
        .register(NewExchange::new("NYSE", "New York Stock Exchange", "America/New_York"))
        .await
        .unwrap();

    let err = service
        .register(NewExchange::new("NYSE", "Some Other Venue", "America/New_York"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(_)));
}

#[tokio::test]
async fn register_rejects_duplicate_name() {
    let (service, _) = service();
    service
        .register(NewExchange::new("NYSE", "New York Stock Exchange", "America/New_York"))
        .await
        .unwrap();

    let err = service
        .register(NewExchange::new("ARCA", "New York Stock Exchange", "America/New_York"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateKey(_)));
}

#[tokio::test]
async fn register_validates_before_touching_the_store() {
    let (service, store) = service();
    let err = service
        .register(NewExchange::new("LSE", "London Stock Exchange", "Europe/Atlantis"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(store.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_is_blocked_while_referenced() {
    let (service, store) = service();
    let exchange = service
        .register(NewExchange::new("NYSE", "New York Stock Exchange", "America/New_York"))
        .await
        .unwrap();
    store.mark_referenced(exchange.id);

    let err = service.delete(exchange.id).await.unwrap_err();
    assert!(matches!(err, Error::ReferentialConflict(_)));
    assert!(service.get(exchange.id).is_ok());
}

#[tokio::test]
async fn get_by_abbrev_resolves_registered_exchange() {
    let (service, _) = service();
    let created = service
        .register(
            NewExchange::new("NASDAQ", "NASDAQ Stock Market", "America/New_York")
                .with_code("XNAS"),
        )
        .await
        .unwrap();

    let found = service.get_by_abbrev("NASDAQ").unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.code.as_deref(), Some("XNAS"));

    let err = service.get_by_abbrev("CBOE").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
