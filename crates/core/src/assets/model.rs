//! Asset domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::{AssetId, ExchangeId};

/// A tradable instrument, bound to exactly one exchange.
///
/// The exchange reference is immutable after creation. Moving an instrument
/// to a different venue is modeled as retiring the old asset row and creating
/// a new one, never as an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub exchange_id: ExchangeId,
    pub symbol: String,
    pub instrument: String,
    pub name: Option<String>,
    pub currency: String,
    pub created_date: DateTime<Utc>,
    pub last_updated_date: DateTime<Utc>,
}

/// Payload for onboarding a new tradable instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub exchange_id: ExchangeId,
    pub symbol: String,
    pub instrument: String,
    pub currency: String,
    pub name: Option<String>,
}

impl NewAsset {
    pub fn new(exchange_id: ExchangeId, symbol: &str, instrument: &str, currency: &str) -> Self {
        Self {
            exchange_id,
            symbol: symbol.to_string(),
            instrument: instrument.to_string(),
            currency: currency.to_string(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Asset symbol cannot be empty".to_string(),
            ));
        }

        if self.instrument.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Asset instrument type cannot be empty".to_string(),
            ));
        }

        if self.currency.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Asset currency cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
