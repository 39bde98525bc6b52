//! Report types for the offline schema migration.
//!
//! The migration itself lives in the storage layer; this module only defines
//! what it must surface to the operator.

use serde::{Deserialize, Serialize};

/// Outcome of a generation-1 -> generation-2 migration run.
///
/// `duplicates_discarded` counts generation-1 price rows that lost the
/// deterministic survivor election for their (date, asset) group. A non-zero
/// count means data was discarded and must be surfaced, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub exchanges_migrated: usize,
    pub vendors_migrated: usize,
    pub assets_migrated: usize,
    pub prices_migrated: usize,
    pub duplicates_discarded: usize,
}

impl MigrationReport {
    /// Whether the run discarded any duplicate price rows.
    pub fn lossy(&self) -> bool {
        self.duplicates_discarded > 0
    }
}
