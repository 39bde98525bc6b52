//! End-of-day price store: models, storage trait, and service.

pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_tests;

pub use model::{NewPriceBar, Ohlcv, PriceBar};
pub use service::PriceService;
pub use store::PriceStore;
