//! Daily price domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AssetId, Day, VendorId};

/// One day's OHLCV values.
///
/// Every field is optional: a NULL is a known gap in the vendor's data, never
/// a zero price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ohlcv {
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub adj_close: Option<Decimal>,
    pub volume: Option<i64>,
}

impl Ohlcv {
    /// Bar with only a close (and matching adjusted close), the common shape
    /// for sparse vendors.
    pub fn close_only(close: Decimal) -> Self {
        Self {
            close: Some(close),
            adj_close: Some(close),
            ..Self::default()
        }
    }
}

/// One stored end-of-day bar for one asset.
///
/// Identified by the composite natural key (day, asset); the vendor is
/// provenance only. `created_date == last_updated_date` means the bar has
/// never been revised since first ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub day: Day,
    pub asset_id: AssetId,
    pub vendor_id: VendorId,
    pub ohlcv: Ohlcv,
    pub created_date: DateTime<Utc>,
    pub last_updated_date: DateTime<Utc>,
}

impl PriceBar {
    /// Whether the bar has been overwritten since its first ingestion
    /// (vendor correction, adjusted-close recalculation after a split, ...).
    pub fn is_revision(&self) -> bool {
        self.last_updated_date > self.created_date
    }
}

/// Payload for one observation heading into the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceBar {
    pub vendor_id: VendorId,
    pub asset_id: AssetId,
    pub day: Day,
    pub ohlcv: Ohlcv,
}
