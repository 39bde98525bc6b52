//! Exchange reference data: models, storage trait, and registry service.

pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_tests;

pub use model::{Exchange, NewExchange};
pub use service::ExchangeService;
pub use store::ExchangeStore;
