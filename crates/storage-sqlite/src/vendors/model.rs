//! Database models for data vendors.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use secmaster_core::errors::Error;
use secmaster_core::types::VendorId;
use secmaster_core::vendors::{NewVendor, Vendor};

use crate::utils::{now_storage_timestamp, parse_storage_timestamp};

/// Database row for a data vendor.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::data_vendors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VendorDB {
    pub id: i64,
    pub name: String,
    pub created_date: String,
    pub last_updated_date: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::data_vendors)]
pub struct NewVendorDB {
    pub name: String,
    pub created_date: String,
    pub last_updated_date: String,
}

impl From<NewVendor> for NewVendorDB {
    fn from(new: NewVendor) -> Self {
        let now = now_storage_timestamp();
        Self {
            name: new.name,
            created_date: now.clone(),
            last_updated_date: now,
        }
    }
}

impl TryFrom<VendorDB> for Vendor {
    type Error = Error;

    fn try_from(db: VendorDB) -> Result<Self, Error> {
        Ok(Vendor {
            id: VendorId::new(db.id),
            name: db.name,
            created_date: parse_storage_timestamp(&db.created_date)?,
            last_updated_date: parse_storage_timestamp(&db.last_updated_date)?,
        })
    }
}
