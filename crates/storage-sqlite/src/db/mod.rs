//! Database connection management: pool creation, pragmas, and embedded
//! schema migrations.

mod write_actor;

pub use write_actor::{spawn_writer, WriteHandle};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use secmaster_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied to every pooled connection.
///
/// Referential integrity checking is always on; it is an invariant of the
/// store, not a toggle. The busy timeout bounds lock waits so contention
/// surfaces as a retryable error instead of blocking indefinitely.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON; \
             PRAGMA journal_mode = WAL; \
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Ensures the database file exists and carries the current schema.
///
/// Returns the path it was given so callers can chain into `create_pool`.
pub fn init(db_path: &str) -> Result<String> {
    if !Path::new(db_path).exists() {
        create_db_file(db_path)?;
    }

    let mut conn = establish_connection(db_path)?;
    run_migrations(&mut conn)?;

    Ok(db_path.to_string())
}

/// Creates the shared r2d2 pool over the SQLite file.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;

    Ok(Arc::new(pool))
}

/// Checks out a connection from the pool.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

/// Applies any pending embedded migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

    if !applied.is_empty() {
        info!("Applied {} schema migration(s)", applied.len());
    }

    Ok(())
}

fn establish_connection(db_path: &str) -> Result<SqliteConnection> {
    let mut conn =
        SqliteConnection::establish(db_path).map_err(|e| Error::from(StorageError::from(e)))?;

    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .map_err(|e| Error::from(StorageError::from(e)))?;

    Ok(conn)
}

fn create_db_file(db_path: &str) -> Result<()> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.exists() {
            fs::create_dir_all(db_dir)
                .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;
        }
    }

    fs::File::create(db_path)
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;

    Ok(())
}
