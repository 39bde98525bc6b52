//! SQLite storage implementation for the securities master.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the store traits defined in `secmaster-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations for the composite-keyed schema
//! - Repository implementations for exchanges, vendors, assets and prices
//! - Database-specific model types (with Diesel derives)
//! - The offline legacy-store migrator
//!
//! # Architecture
//!
//! This crate is the only place in the system where Diesel dependencies
//! exist. `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!               │
//!               ▼
//!     storage-sqlite (this crate)
//!               │
//!               ▼
//!           SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod assets;
pub mod exchanges;
pub mod prices;
pub mod vendors;

// Offline maintenance
pub mod migrator;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export repository types
pub use assets::AssetRepository;
pub use exchanges::ExchangeRepository;
pub use migrator::migrate_legacy_store;
pub use prices::PriceRepository;
pub use vendors::VendorRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from secmaster-core for convenience
pub use secmaster_core::errors::{DatabaseError, Error, Result};
