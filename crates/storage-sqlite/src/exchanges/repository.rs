//! SQLite repository for exchanges.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use secmaster_core::errors::Result;
use secmaster_core::exchanges::{Exchange, ExchangeStore, NewExchange};
use secmaster_core::types::ExchangeId;

use super::model::{ExchangeDB, NewExchangeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::exchanges::dsl as exchanges_dsl;
use crate::utils::now_storage_timestamp;

pub struct ExchangeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExchangeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ExchangeStore for ExchangeRepository {
    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange> {
        let row = NewExchangeDB::from(new_exchange);

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExchangeDB> {
                diesel::insert_into(exchanges_dsl::exchanges)
                    .values(&row)
                    .get_result::<ExchangeDB>(conn)
                    .into_core()
            })
            .await?;

        created.try_into()
    }

    async fn touch(&self, id: ExchangeId) -> Result<Exchange> {
        let id_raw = id.as_i64();

        let touched = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExchangeDB> {
                diesel::update(exchanges_dsl::exchanges.find(id_raw))
                    .set(exchanges_dsl::last_updated_date.eq(now_storage_timestamp()))
                    .get_result::<ExchangeDB>(conn)
                    .into_core()
            })
            .await?;

        touched.try_into()
    }

    async fn delete(&self, id: ExchangeId) -> Result<()> {
        let id_raw = id.as_i64();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(exchanges_dsl::exchanges.find(id_raw))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn get(&self, id: ExchangeId) -> Result<Exchange> {
        let mut conn = get_connection(&self.pool)?;

        exchanges_dsl::exchanges
            .find(id.as_i64())
            .select(ExchangeDB::as_select())
            .first::<ExchangeDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn get_by_abbrev(&self, abbrev: &str) -> Result<Exchange> {
        let mut conn = get_connection(&self.pool)?;

        exchanges_dsl::exchanges
            .filter(exchanges_dsl::abbrev.eq(abbrev))
            .select(ExchangeDB::as_select())
            .first::<ExchangeDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn list(&self) -> Result<Vec<Exchange>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = exchanges_dsl::exchanges
            .order(exchanges_dsl::abbrev.asc())
            .select(ExchangeDB::as_select())
            .load::<ExchangeDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Exchange::try_from).collect()
    }
}
