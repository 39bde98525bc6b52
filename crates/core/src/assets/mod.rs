//! Asset catalog: models, storage trait, and service.

pub mod model;
pub mod service;
pub mod store;


pub use model::{Asset, NewAsset};
pub use service::AssetService;
pub use store::AssetStore;
