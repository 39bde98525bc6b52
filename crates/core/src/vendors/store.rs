//! Data vendor storage trait.

use async_trait::async_trait;

use super::model::{NewVendor, Vendor};
use crate::errors::Result;
use crate::types::VendorId;

/// Storage interface for vendor reference data.
#[async_trait]
pub trait VendorStore: Send + Sync {
    /// Inserts a new vendor. Fails with `DuplicateKey` when the name exists.
    async fn create(&self, new_vendor: NewVendor) -> Result<Vendor>;

    /// Restamps `last_updated_date` after an administrative correction.
    async fn touch(&self, id: VendorId) -> Result<Vendor>;

    /// Deletes a vendor. Fails with `ReferentialConflict` while any price row
    /// still references it.
    async fn delete(&self, id: VendorId) -> Result<()>;

    fn get(&self, id: VendorId) -> Result<Vendor>;

    /// Resolves a vendor by its unique name.
    fn get_by_name(&self, name: &str) -> Result<Vendor>;

    fn list(&self) -> Result<Vec<Vendor>>;
}
