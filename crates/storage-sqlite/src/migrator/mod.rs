//! Offline migration from the generation-1 (surrogate-keyed) schema to the
//! generation-2 (composite-keyed) schema.
//!
//! Generation 1 kept `daily_price` rows under an autoincrement id with no
//! uniqueness over (date, asset), so repeated ingestion could stack duplicate
//! rows for the same bar. This migration rebuilds the store around the
//! natural key (date, asset_id):
//!
//! 1. exchanges are carried with their ids and gain a NULL `code` column;
//! 2. data vendors and assets are carried unchanged;
//! 3. price rows are grouped by (date, asset_id); each group's survivor is
//!    the row with the latest `last_updated_date`, tie-broken by highest
//!    surrogate id, and every discarded row is counted;
//! 4. the surrogate id disappears and (date, asset_id) becomes the key.
//!
//! The whole transform runs inside one exclusive transaction on the store
//! file. Any violation rolls the store back to its generation-1 state. This
//! is a maintenance operation; it must not run concurrently with ingestion.

use std::path::Path;

use log::{info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use secmaster_core::errors::{Error, MigrationError, Result};
use secmaster_core::migration::MigrationReport;

/// Version stamp of the embedded baseline migration. Seeded into diesel's
/// bookkeeping table so a migrated store opens through `db::init` without
/// replaying the create migration.
const BASELINE_MIGRATION_VERSION: &str = "20240601000000";

const CREATE_TARGET_SCHEMA: &str = "
CREATE TABLE exchanges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    abbrev TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE,
    code TEXT UNIQUE,
    timezone TEXT NOT NULL,
    created_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    last_updated_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE TABLE data_vendors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    last_updated_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE TABLE assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exchange_id BIGINT NOT NULL REFERENCES exchanges (id),
    symbol TEXT NOT NULL,
    instrument TEXT NOT NULL,
    name TEXT,
    currency TEXT NOT NULL,
    created_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    last_updated_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (exchange_id, symbol)
);
CREATE TABLE daily_prices (
    date TEXT NOT NULL,
    asset_id BIGINT NOT NULL REFERENCES assets (id),
    data_vendor_id BIGINT NOT NULL REFERENCES data_vendors (id),
    open TEXT,
    high TEXT,
    low TEXT,
    close TEXT,
    adj_close TEXT,
    volume BIGINT,
    created_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    last_updated_date TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now')),
    PRIMARY KEY (date, asset_id)
);
CREATE INDEX idx_daily_prices_asset_date ON daily_prices (asset_id, date);
";

/// Migrates a generation-1 store file in place.
///
/// Fails fast with `AlreadyMigrated` when the file already carries the
/// target shape, and with `MigrationAborted` (rolling back everything) on
/// any integrity violation. On success the report carries per-table row
/// counts and the number of duplicate price rows discarded.
pub fn migrate_legacy_store(db_path: &Path) -> Result<MigrationReport> {
    let mut conn = Connection::open(db_path).map_err(abort)?;

    detect_generation(&conn)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Exclusive)
        .map_err(abort)?;

    check_referential_integrity(&tx)?;

    let report = transform(&tx)?;

    tx.commit().map_err(abort)?;

    if report.lossy() {
        warn!(
            "Migration discarded {} duplicate price row(s); survivors were chosen by latest last_updated_date, then highest id",
            report.duplicates_discarded
        );
    }
    info!(
        "Migrated store: {} exchanges, {} vendors, {} assets, {} price bars",
        report.exchanges_migrated,
        report.vendors_migrated,
        report.assets_migrated,
        report.prices_migrated
    );

    Ok(report)
}

fn detect_generation(conn: &Connection) -> Result<()> {
    if has_table(conn, "daily_prices")? || has_table(conn, "exchanges")? {
        return Err(MigrationError::AlreadyMigrated.into());
    }

    for required in ["exchange", "data_vendor", "assets", "daily_price"] {
        if !has_table(conn, required)? {
            return Err(MigrationError::Aborted(format!(
                "not a generation-1 store: missing table '{}'",
                required
            ))
            .into());
        }
    }

    Ok(())
}

/// Generation 1 was often populated with foreign keys disabled, so dangling
/// references are checked up front rather than discovered halfway through
/// the copy.
fn check_referential_integrity(tx: &Transaction<'_>) -> Result<()> {
    let orphan_assets: i64 = tx
        .query_row(
            "SELECT COUNT(*) FROM assets a \
             LEFT JOIN exchange e ON e.id = a.exchange_id \
             WHERE e.id IS NULL",
            [],
            |row| row.get(0),
        )
        .map_err(abort)?;
    if orphan_assets > 0 {
        return Err(MigrationError::Aborted(format!(
            "{} asset row(s) reference a missing exchange",
            orphan_assets
        ))
        .into());
    }

    let orphan_prices: i64 = tx
        .query_row(
            "SELECT COUNT(*) FROM daily_price p \
             LEFT JOIN assets a ON a.id = p.asset_id \
             LEFT JOIN data_vendor v ON v.id = p.data_vendor_id \
             WHERE a.id IS NULL OR v.id IS NULL",
            [],
            |row| row.get(0),
        )
        .map_err(abort)?;
    if orphan_prices > 0 {
        return Err(MigrationError::Aborted(format!(
            "{} price row(s) reference a missing asset or vendor",
            orphan_prices
        ))
        .into());
    }

    Ok(())
}

fn transform(tx: &Transaction<'_>) -> Result<MigrationReport> {
    let legacy_price_rows: i64 = tx
        .query_row("SELECT COUNT(*) FROM daily_price", [], |row| row.get(0))
        .map_err(abort)?;

    // The asset table keeps its name across generations; move the legacy one
    // aside so the target table can be created next to it.
    tx.execute_batch("ALTER TABLE assets RENAME TO assets_legacy;")
        .map_err(abort)?;
    tx.execute_batch(CREATE_TARGET_SCHEMA).map_err(abort)?;

    let exchanges_migrated = tx
        .execute(
            "INSERT INTO exchanges (id, abbrev, name, code, timezone, created_date, last_updated_date) \
             SELECT id, abbrev, name, NULL, timezone, created_date, last_updated_date FROM exchange",
            [],
        )
        .map_err(abort)?;

    let vendors_migrated = tx
        .execute(
            "INSERT INTO data_vendors (id, name, created_date, last_updated_date) \
             SELECT id, name, created_date, last_updated_date FROM data_vendor",
            [],
        )
        .map_err(abort)?;

    let assets_migrated = tx
        .execute(
            "INSERT INTO assets (id, exchange_id, symbol, instrument, name, currency, created_date, last_updated_date) \
             SELECT id, exchange_id, symbol, instrument, name, currency, created_date, last_updated_date \
             FROM assets_legacy",
            [],
        )
        .map_err(abort)?;

    // Survivor election: per (date, asset_id) group, the row with the most
    // recent last_updated_date wins; ties go to the highest surrogate id.
    // Timestamps are normalized through strftime so stores mixing RFC 3339
    // and SQLite-default text compare by instant rather than by bytes.
    let prices_migrated = tx
        .execute(
            "INSERT INTO daily_prices (date, asset_id, data_vendor_id, open, high, low, close, adj_close, volume, created_date, last_updated_date) \
             SELECT p.date, p.asset_id, p.data_vendor_id, p.open, p.high, p.low, p.close, p.adj_close, p.volume, p.created_date, p.last_updated_date \
             FROM daily_price p \
             WHERE p.id = ( \
                 SELECT q.id FROM daily_price q \
                 WHERE q.date = p.date AND q.asset_id = p.asset_id \
                 ORDER BY strftime('%Y-%m-%dT%H:%M:%f', q.last_updated_date) DESC, q.id DESC \
                 LIMIT 1 \
             )",
            [],
        )
        .map_err(abort)?;

    tx.execute_batch(
        "DROP TABLE daily_price; \
         DROP TABLE assets_legacy; \
         DROP TABLE data_vendor; \
         DROP TABLE exchange;",
    )
    .map_err(abort)?;

    seed_migration_bookkeeping(tx)?;

    Ok(MigrationReport {
        exchanges_migrated,
        vendors_migrated,
        assets_migrated,
        prices_migrated,
        duplicates_discarded: legacy_price_rows as usize - prices_migrated,
    })
}

fn seed_migration_bookkeeping(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS __diesel_schema_migrations ( \
             version VARCHAR(50) PRIMARY KEY NOT NULL, \
             run_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP \
         );",
    )
    .map_err(abort)?;

    tx.execute(
        "INSERT OR IGNORE INTO __diesel_schema_migrations (version) VALUES (?1)",
        [BASELINE_MIGRATION_VERSION],
    )
    .map_err(abort)?;

    Ok(())
}

fn has_table(conn: &Connection, name: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get(0),
    )
    .map_err(abort)
}

fn abort(e: rusqlite::Error) -> Error {
    MigrationError::Aborted(e.to_string()).into()
}
