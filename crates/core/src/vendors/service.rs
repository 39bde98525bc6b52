//! Data vendor registry service.

use log::debug;
use std::sync::Arc;

use super::model::{NewVendor, Vendor};
use super::store::VendorStore;
use crate::errors::Result;
use crate::types::VendorId;

/// Service for registering and resolving data vendors.
pub struct VendorService {
    store: Arc<dyn VendorStore>,
}

impl VendorService {
    pub fn new(store: Arc<dyn VendorStore>) -> Self {
        Self { store }
    }

    /// Registers a new vendor after validating the payload.
    pub async fn register(&self, new_vendor: NewVendor) -> Result<Vendor> {
        new_vendor.validate()?;
        debug!("Registering data vendor {}", new_vendor.name);
        self.store.create(new_vendor).await
    }

    pub fn get(&self, id: VendorId) -> Result<Vendor> {
        self.store.get(id)
    }

    /// Resolves a vendor by its unique name, e.g. "Yahoo Finance".
    pub fn get_by_name(&self, name: &str) -> Result<Vendor> {
        self.store.get_by_name(name)
    }

    pub fn list(&self) -> Result<Vec<Vendor>> {
        self.store.list()
    }

    /// Restamps `last_updated_date` after an administrative correction.
    pub async fn touch(&self, id: VendorId) -> Result<Vendor> {
        self.store.touch(id).await
    }

    /// Deletes a vendor; fails with `ReferentialConflict` while price rows
    /// reference it.
    pub async fn delete(&self, id: VendorId) -> Result<()> {
        self.store.delete(id).await
    }
}
