//! Database models for exchanges.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use secmaster_core::errors::Error;
use secmaster_core::exchanges::{Exchange, NewExchange};
use secmaster_core::types::ExchangeId;

use crate::utils::{now_storage_timestamp, parse_storage_timestamp};

/// Database row for an exchange.
#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::exchanges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeDB {
    pub id: i64,
    pub abbrev: String,
    pub name: String,
    pub code: Option<String>,
    pub timezone: String,
    pub created_date: String,
    pub last_updated_date: String,
}

/// Insert payload; the id comes from SQLite, the timestamps from the
/// repository at write time.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::exchanges)]
pub struct NewExchangeDB {
    pub abbrev: String,
    pub name: String,
    pub code: Option<String>,
    pub timezone: String,
    pub created_date: String,
    pub last_updated_date: String,
}

impl From<NewExchange> for NewExchangeDB {
    fn from(new: NewExchange) -> Self {
        let now = now_storage_timestamp();
        Self {
            abbrev: new.abbrev,
            name: new.name,
            code: new.code,
            timezone: new.timezone,
            created_date: now.clone(),
            last_updated_date: now,
        }
    }
}

impl TryFrom<ExchangeDB> for Exchange {
    type Error = Error;

    fn try_from(db: ExchangeDB) -> Result<Self, Error> {
        Ok(Exchange {
            id: ExchangeId::new(db.id),
            abbrev: db.abbrev,
            name: db.name,
            code: db.code,
            timezone: db.timezone,
            created_date: parse_storage_timestamp(&db.created_date)?,
            last_updated_date: parse_storage_timestamp(&db.last_updated_date)?,
        })
    }
}
