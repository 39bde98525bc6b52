//! SQLite repository for the asset catalog.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use secmaster_core::assets::{Asset, AssetStore, NewAsset};
use secmaster_core::errors::Result;
use secmaster_core::types::{AssetId, ExchangeId};

use super::model::{AssetDB, NewAssetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::assets::dsl as assets_dsl;

pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AssetStore for AssetRepository {
    async fn create(&self, new_asset: NewAsset) -> Result<Asset> {
        let row = NewAssetDB::from(new_asset);

        let created = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetDB> {
                diesel::insert_into(assets_dsl::assets)
                    .values(&row)
                    .get_result::<AssetDB>(conn)
                    .into_core()
            })
            .await?;

        created.try_into()
    }

    async fn delete(&self, id: AssetId) -> Result<()> {
        let id_raw = id.as_i64();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(assets_dsl::assets.find(id_raw))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn get(&self, id: AssetId) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;

        assets_dsl::assets
            .find(id.as_i64())
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn find_by_symbol(&self, exchange_id: ExchangeId, symbol: &str) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = assets_dsl::assets
            .filter(assets_dsl::exchange_id.eq(exchange_id.as_i64()))
            .filter(assets_dsl::symbol.eq(symbol))
            .order(assets_dsl::id.asc())
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Asset::try_from).collect()
    }

    fn list(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = assets_dsl::assets
            .order((assets_dsl::exchange_id.asc(), assets_dsl::symbol.asc()))
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Asset::try_from).collect()
    }
}
