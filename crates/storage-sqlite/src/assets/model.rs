//! Database models for assets.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use secmaster_core::assets::{Asset, NewAsset};
use secmaster_core::errors::Error;
use secmaster_core::types::{AssetId, ExchangeId};

use crate::utils::{now_storage_timestamp, parse_storage_timestamp};

/// Database row for a tradable instrument.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: i64,
    pub exchange_id: i64,
    pub symbol: String,
    pub instrument: String,
    pub name: Option<String>,
    pub currency: String,
    pub created_date: String,
    pub last_updated_date: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
pub struct NewAssetDB {
    pub exchange_id: i64,
    pub symbol: String,
    pub instrument: String,
    pub name: Option<String>,
    pub currency: String,
    pub created_date: String,
    pub last_updated_date: String,
}

impl From<NewAsset> for NewAssetDB {
    fn from(new: NewAsset) -> Self {
        let now = now_storage_timestamp();
        Self {
            exchange_id: new.exchange_id.as_i64(),
            symbol: new.symbol,
            instrument: new.instrument,
            name: new.name,
            currency: new.currency,
            created_date: now.clone(),
            last_updated_date: now,
        }
    }
}

impl TryFrom<AssetDB> for Asset {
    type Error = Error;

    fn try_from(db: AssetDB) -> Result<Self, Error> {
        Ok(Asset {
            id: AssetId::new(db.id),
            exchange_id: ExchangeId::new(db.exchange_id),
            symbol: db.symbol,
            instrument: db.instrument,
            name: db.name,
            currency: db.currency,
            created_date: parse_storage_timestamp(&db.created_date)?,
            last_updated_date: parse_storage_timestamp(&db.last_updated_date)?,
        })
    }
}
