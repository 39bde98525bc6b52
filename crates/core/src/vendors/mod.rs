//! Data vendor reference data: models, storage trait, and registry service.

pub mod model;
pub mod service;
pub mod store;

pub use model::{NewVendor, Vendor};
pub use service::VendorService;
pub use store::VendorStore;
