//! SQLite storage implementation for exchanges.

mod model;
mod repository;

pub use model::{ExchangeDB, NewExchangeDB};
pub use repository::ExchangeRepository;
