//! Marketplace storage-type catalog port.
//!
//! Marketplace integrations impose per-storage-type minimum volume sizes
//! that the planner must respect. The catalog is modeled as a port so the
//! planner stays decoupled from any particular integration's
//! configuration shape; a static configuration-backed adapter is provided
//! for the common case.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Port
// =============================================================================

/// Port for looking up marketplace storage-type requirements.
pub trait StorageTypeCatalog {
    /// Minimum volume size mandated for a storage type, if the catalog
    /// knows the type and the integration constrains it.
    fn minimum_volume_size(&self, storage_type: &str) -> Option<MinimumVolumeSize>;
}

/// A minimum volume size requirement with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MinimumVolumeSize {
    /// Magnitude of the minimum size
    pub size: f64,
    /// Unit symbol (Kubernetes style, e.g. "Gi")
    pub unit: String,
    /// Human-readable storage type label for validation messages
    pub label: String,
}

/// A catalog selection handed to the planner: which catalog to consult
/// and which storage type the caller picked.
#[derive(Clone, Copy)]
pub struct Integration<'a> {
    pub catalog: &'a dyn StorageTypeCatalog,
    pub storage_type: &'a str,
}

// =============================================================================
// Static Configuration Adapter
// =============================================================================

/// One storage type entry in a marketplace configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageTypeConfiguration {
    /// Storage type key as selected by the caller
    pub type_selection: String,

    /// Display label for this storage type
    pub label: String,

    /// Minimum volume size, if the marketplace constrains this type
    #[serde(default)]
    pub minimum_volume_size: Option<VolumeSizeRequirement>,
}

/// The size half of a configuration entry (label lives on the entry).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSizeRequirement {
    /// Magnitude of the minimum drive size
    pub drive_size: f64,
    /// Unit symbol (Kubernetes style)
    pub size_unit: String,
}

/// Static marketplace configuration implementing the catalog port.
///
/// Mirrors the per-marketplace panel configuration the integrations ship:
/// an ordered list of storage types, some of which carry a minimum volume
/// size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceConfiguration {
    /// Configured storage types, in display order
    pub configurations: Vec<StorageTypeConfiguration>,
}

impl MarketplaceConfiguration {
    pub fn new(configurations: Vec<StorageTypeConfiguration>) -> Self {
        Self { configurations }
    }
}

impl StorageTypeCatalog for MarketplaceConfiguration {
    fn minimum_volume_size(&self, storage_type: &str) -> Option<MinimumVolumeSize> {
        let entry = self
            .configurations
            .iter()
            .find(|c| c.type_selection == storage_type)?;
        let requirement = entry.minimum_volume_size.as_ref()?;
        Some(MinimumVolumeSize {
            size: requirement.drive_size,
            unit: requirement.size_unit.clone(),
            label: entry.label.clone(),
        })
    }
}
