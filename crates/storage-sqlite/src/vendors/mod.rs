//! SQLite storage implementation for data vendors.

mod model;
mod repository;

pub use model::{NewVendorDB, VendorDB};
pub use repository::VendorRepository;
