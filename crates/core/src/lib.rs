//! secmaster-core - Domain entities, services, and storage traits.
//!
//! This crate contains the core model of the securities store: exchanges and
//! data vendors (identity registry), the asset catalog, and the end-of-day
//! price store. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod assets;
pub mod errors;
pub mod exchanges;
pub mod migration;
pub mod prices;
pub mod types;
pub mod vendors;

// Re-export common entity types
pub use assets::{Asset, AssetService, AssetStore, NewAsset};
pub use exchanges::{Exchange, ExchangeService, ExchangeStore, NewExchange};
pub use prices::{NewPriceBar, Ohlcv, PriceBar, PriceService, PriceStore};
pub use vendors::{NewVendor, Vendor, VendorService, VendorStore};

// Re-export strong types and report types
pub use migration::MigrationReport;
pub use types::{AssetId, Day, ExchangeId, VendorId};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
