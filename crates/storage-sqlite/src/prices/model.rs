//! Database models for daily prices.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use secmaster_core::errors::Error;
use secmaster_core::prices::{NewPriceBar, Ohlcv, PriceBar};
use secmaster_core::types::{AssetId, Day, VendorId};

use crate::errors::StorageError;
use crate::utils::{now_storage_timestamp, parse_storage_timestamp};

/// Database row for one end-of-day bar, keyed by (date, asset_id).
///
/// Price fields are TEXT decimal strings; NULL marks a known gap in the
/// vendor's data, never a zero price.
#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, Clone, Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::daily_prices)]
#[diesel(primary_key(date, asset_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceBarDB {
    pub date: String,
    pub asset_id: i64,
    pub data_vendor_id: i64,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub adj_close: Option<String>,
    pub volume: Option<i64>,
    pub created_date: String,
    pub last_updated_date: String,
}

impl From<NewPriceBar> for PriceBarDB {
    fn from(new: NewPriceBar) -> Self {
        let now = now_storage_timestamp();
        Self {
            date: new.day.to_storage_string(),
            asset_id: new.asset_id.as_i64(),
            data_vendor_id: new.vendor_id.as_i64(),
            open: decimal_to_db(new.ohlcv.open),
            high: decimal_to_db(new.ohlcv.high),
            low: decimal_to_db(new.ohlcv.low),
            close: decimal_to_db(new.ohlcv.close),
            adj_close: decimal_to_db(new.ohlcv.adj_close),
            volume: new.ohlcv.volume,
            created_date: now.clone(),
            last_updated_date: now,
        }
    }
}

impl TryFrom<PriceBarDB> for PriceBar {
    type Error = Error;

    fn try_from(db: PriceBarDB) -> Result<Self, Error> {
        Ok(PriceBar {
            day: Day::parse(&db.date)?,
            asset_id: AssetId::new(db.asset_id),
            vendor_id: VendorId::new(db.data_vendor_id),
            ohlcv: Ohlcv {
                open: decimal_from_db(db.open)?,
                high: decimal_from_db(db.high)?,
                low: decimal_from_db(db.low)?,
                close: decimal_from_db(db.close)?,
                adj_close: decimal_from_db(db.adj_close)?,
                volume: db.volume,
            },
            created_date: parse_storage_timestamp(&db.created_date)?,
            last_updated_date: parse_storage_timestamp(&db.last_updated_date)?,
        })
    }
}

fn decimal_to_db(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

fn decimal_from_db(value: Option<String>) -> Result<Option<Decimal>, StorageError> {
    value
        .map(|s| {
            Decimal::from_str(&s)
                .map_err(|_| StorageError::Corrupted(format!("'{}' is not a decimal price", s)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_round_trip_through_text() {
        let stored = decimal_to_db(Some(dec!(131.5)));
        assert_eq!(stored.as_deref(), Some("131.5"));
        assert_eq!(decimal_from_db(stored).unwrap(), Some(dec!(131.5)));
        assert_eq!(decimal_from_db(None).unwrap(), None);
    }

    #[test]
    fn corrupt_decimal_text_is_reported() {
        assert!(decimal_from_db(Some("131.5.0".to_string())).is_err());
    }
}
