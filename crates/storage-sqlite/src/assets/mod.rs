//! SQLite storage implementation for the asset catalog.

mod model;
mod repository;

pub use model::{AssetDB, NewAssetDB};
pub use repository::AssetRepository;
