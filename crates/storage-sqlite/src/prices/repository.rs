//! SQLite repository for daily prices.
//!
//! Upserts target the composite primary key (date, asset_id). The conflict
//! clause overwrites price fields, vendor provenance, and the last-modified
//! timestamp while leaving `created_date` untouched, so a bar's creation
//! instant survives any number of revisions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;
use std::sync::Arc;

use secmaster_core::errors::Result;
use secmaster_core::prices::{NewPriceBar, PriceBar, PriceStore};
use secmaster_core::types::{AssetId, Day};

use super::model::PriceBarDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::daily_prices::dsl as prices_dsl;

pub struct PriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn upsert_row(conn: &mut SqliteConnection, row: &PriceBarDB) -> Result<PriceBarDB> {
    diesel::insert_into(prices_dsl::daily_prices)
        .values(row)
        .on_conflict((prices_dsl::date, prices_dsl::asset_id))
        .do_update()
        .set((
            prices_dsl::data_vendor_id.eq(excluded(prices_dsl::data_vendor_id)),
            prices_dsl::open.eq(excluded(prices_dsl::open)),
            prices_dsl::high.eq(excluded(prices_dsl::high)),
            prices_dsl::low.eq(excluded(prices_dsl::low)),
            prices_dsl::close.eq(excluded(prices_dsl::close)),
            prices_dsl::adj_close.eq(excluded(prices_dsl::adj_close)),
            prices_dsl::volume.eq(excluded(prices_dsl::volume)),
            prices_dsl::last_updated_date.eq(excluded(prices_dsl::last_updated_date)),
        ))
        .get_result::<PriceBarDB>(conn)
        .into_core()
}

#[async_trait]
impl PriceStore for PriceRepository {
    async fn upsert(&self, bar: NewPriceBar) -> Result<PriceBar> {
        let row = PriceBarDB::from(bar);

        let stored = self
            .writer
            .exec(move |conn: &mut SqliteConnection| upsert_row(conn, &row))
            .await?;

        stored.try_into()
    }

    async fn upsert_batch(&self, bars: Vec<NewPriceBar>) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }

        let rows: Vec<PriceBarDB> = bars.into_iter().map(PriceBarDB::from).collect();

        // One upsert statement per row: SQLite has no multi-row form of the
        // conflict clause through diesel. The whole batch still commits as
        // one writer transaction.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                for row in &rows {
                    upsert_row(conn, row)?;
                }
                Ok(rows.len())
            })
            .await
    }

    fn range(&self, asset_id: AssetId, start: Day, end: Day) -> Result<Vec<PriceBar>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = prices_dsl::daily_prices
            .filter(prices_dsl::asset_id.eq(asset_id.as_i64()))
            .filter(prices_dsl::date.ge(start.to_storage_string()))
            .filter(prices_dsl::date.le(end.to_storage_string()))
            .order(prices_dsl::date.asc())
            .select(PriceBarDB::as_select())
            .load::<PriceBarDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(PriceBar::try_from).collect()
    }

    fn latest(&self, asset_id: AssetId) -> Result<Option<PriceBar>> {
        let mut conn = get_connection(&self.pool)?;

        let row = prices_dsl::daily_prices
            .filter(prices_dsl::asset_id.eq(asset_id.as_i64()))
            .order(prices_dsl::date.desc())
            .select(PriceBarDB::as_select())
            .first::<PriceBarDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(PriceBar::try_from).transpose()
    }

    fn latest_day(&self, asset_id: AssetId) -> Result<Option<Day>> {
        let mut conn = get_connection(&self.pool)?;

        let date: Option<String> = prices_dsl::daily_prices
            .filter(prices_dsl::asset_id.eq(asset_id.as_i64()))
            .select(diesel::dsl::max(prices_dsl::date))
            .first::<Option<String>>(&mut conn)
            .into_core()?;

        date.map(|s| Day::parse(&s)).transpose()
    }
}
