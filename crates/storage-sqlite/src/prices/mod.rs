//! SQLite storage implementation for daily prices.

mod model;
mod repository;

pub use model::PriceBarDB;
pub use repository::PriceRepository;
