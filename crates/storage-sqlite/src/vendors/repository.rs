//! SQLite repository for data vendors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use secmaster_core::errors::Result;
use secmaster_core::types::VendorId;
use secmaster_core::vendors::{NewVendor, Vendor, VendorStore};

use super::model::{NewVendorDB, VendorDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::data_vendors::dsl as vendors_dsl;
use crate::utils::now_storage_timestamp;

pub struct VendorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VendorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl VendorStore for VendorRepository {
    async fn create(&self, new_vendor: NewVendor) -> Result<Vendor> {
        let row = NewVendorDB::from(new_vendor);

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VendorDB> {
                diesel::insert_into(vendors_dsl::data_vendors)
                    .values(&row)
                    .get_result::<VendorDB>(conn)
                    .into_core()
            })
            .await?;

        created.try_into()
    }

    async fn touch(&self, id: VendorId) -> Result<Vendor> {
        let id_raw = id.as_i64();

        let touched = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VendorDB> {
                diesel::update(vendors_dsl::data_vendors.find(id_raw))
                    .set(vendors_dsl::last_updated_date.eq(now_storage_timestamp()))
                    .get_result::<VendorDB>(conn)
                    .into_core()
            })
            .await?;

        touched.try_into()
    }

    async fn delete(&self, id: VendorId) -> Result<()> {
        let id_raw = id.as_i64();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(vendors_dsl::data_vendors.find(id_raw))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn get(&self, id: VendorId) -> Result<Vendor> {
        let mut conn = get_connection(&self.pool)?;

        vendors_dsl::data_vendors
            .find(id.as_i64())
            .select(VendorDB::as_select())
            .first::<VendorDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn get_by_name(&self, name: &str) -> Result<Vendor> {
        let mut conn = get_connection(&self.pool)?;

        vendors_dsl::data_vendors
            .filter(vendors_dsl::name.eq(name))
            .select(VendorDB::as_select())
            .first::<VendorDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn list(&self) -> Result<Vec<Vendor>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = vendors_dsl::data_vendors
            .order(vendors_dsl::name.asc())
            .select(VendorDB::as_select())
            .load::<VendorDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Vendor::try_from).collect()
    }
}
