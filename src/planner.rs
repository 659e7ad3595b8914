//! Pool layout planner.
//!
//! Computes a feasible physical layout (nodes, volumes per node, volume
//! size) for a storage pool from a desired usable capacity. The planner
//! is a pure function over its arguments: no I/O, no shared state, safe
//! to call concurrently.
//!
//! Two modes exist, selected by whether the caller pins drives per node:
//!
//! - **Auto mode**: the planner chooses a volume size up to a 256Gi
//!   per-volume ceiling and derives the volume count from it.
//! - **Forced-drives mode**: the drive count is fixed (hardware already
//!   exists) and the volume size floats to fit the requested capacity.
//!
//! Both modes converge to an integral volumes-per-node count. Rounding
//! the volume count up must never overshoot the caller's cluster-size
//! budget; when it would, planning fails instead.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Integration;
use crate::error::{Error, Result};
use crate::units::K8S_UNITS;

/// Minimum space a pool (and each of its volumes) must provide: 1Gi.
pub const MIN_POOL_SIZE: u64 = 1 << 30;

/// Hard per-volume ceiling used by auto mode: 256Gi.
pub const MAX_VOLUME_SIZE: u64 = MIN_POOL_SIZE * 256;

// =============================================================================
// Value Objects
// =============================================================================

/// Raw user-entered desired usable capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRequest {
    /// Magnitude of the requested capacity
    pub value: f64,
    /// Unit symbol (Kubernetes style, e.g. "Ti")
    pub unit: String,
}

impl CapacityRequest {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Absolute byte count of the request. Unknown unit symbols yield 0,
    /// which the planner then rejects as below the pool minimum.
    pub fn to_bytes(&self) -> u64 {
        K8S_UNITS.to_bytes(self.value, &self.unit)
    }
}

/// Constraints the caller places on the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstraints {
    /// Candidate node count. The planner never infers this; callers
    /// supply it (from a heuristic or a fixed topology) and it must be
    /// at least 1.
    pub nodes: u32,

    /// Pinned drives per node. `None` lets the planner choose (auto
    /// mode); `Some(0)` is rejected.
    #[serde(default)]
    pub drives_per_node: Option<u32>,

    /// Upper bound on total allocated bytes across the cluster.
    pub max_cluster_bytes: u64,
}

/// A feasible pool layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Number of nodes in the pool
    pub nodes: u32,

    /// Volumes provisioned on each node
    pub volumes_per_node: u32,

    /// Total volumes across the pool; always `volumes_per_node * nodes`
    pub total_volumes: u64,

    /// Uniform size of each volume in bytes
    pub volume_size_bytes: u64,
}

// =============================================================================
// Planner
// =============================================================================

/// Compute a feasible layout for the requested capacity.
///
/// Validation happens before any allocation arithmetic, first failure
/// winning: capacity below 1Gi, then a zero pinned drive count, then
/// unusable numeric input. Allocation-infeasibility failures (budget
/// overshoot, volume below 1Gi or below a catalog minimum) surface after
/// the arithmetic. See [`Error`] for the full set.
pub fn plan_layout(
    request: &CapacityRequest,
    constraints: &LayoutConstraints,
    integration: Option<Integration<'_>>,
) -> Result<Layout> {
    let requested_bytes = request.to_bytes();

    if requested_bytes < MIN_POOL_SIZE {
        return Err(Error::PoolSizeTooSmall);
    }

    if constraints.drives_per_node == Some(0) {
        return Err(Error::DriveCountTooSmall);
    }

    if constraints.nodes == 0 || constraints.max_cluster_bytes == 0 || !request.value.is_finite() {
        return Err(Error::InvalidInput);
    }

    debug!(
        requested_bytes,
        nodes = constraints.nodes,
        drives_per_node = ?constraints.drives_per_node,
        max_cluster_bytes = constraints.max_cluster_bytes,
        "planning pool layout"
    );

    structure_calc(
        constraints.nodes,
        requested_bytes,
        MAX_VOLUME_SIZE,
        constraints.max_cluster_bytes,
        constraints.drives_per_node,
        integration,
    )
}

/// Core layout arithmetic. Volume counts are carried as reals until the
/// fractional correction step forces them integral.
fn structure_calc(
    nodes: u32,
    desired_capacity: u64,
    max_volume_size: u64,
    max_cluster_bytes: u64,
    drives_per_node: Option<u32>,
    integration: Option<Integration<'_>>,
) -> Result<Layout> {
    let desired = desired_capacity as f64;

    let mut volume_size: f64;
    let mut total_volumes: f64;
    let mut volumes_per_node: f64;

    match drives_per_node {
        None => {
            // vS = floor(min(desired / max(4, nodes), ceiling))
            volume_size =
                (desired / u32::max(4, nodes) as f64).min(max_volume_size as f64).floor();
            total_volumes = desired / volume_size;
            volumes_per_node = total_volumes / nodes as f64;
        }
        Some(drives) => {
            volumes_per_node = drives as f64;
            total_volumes = volumes_per_node * nodes as f64;
            volume_size = (desired / total_volumes).floor();
        }
    }

    // Fractional volume counts never reach the caller: force the count up
    // and re-derive the volume size downward, then make sure the rounding
    // did not overshoot the cluster budget.
    if volumes_per_node.fract() > 0.0 {
        volumes_per_node = volumes_per_node.ceil();
        total_volumes = volumes_per_node * nodes as f64;
        volume_size = (desired / total_volumes).floor();

        let allocated = volume_size * volumes_per_node * nodes as f64;
        if allocated > max_cluster_bytes as f64 {
            debug!(
                allocated,
                max_cluster_bytes, "rounded allocation exceeds cluster budget"
            );
            return Err(Error::UnableToAllocate);
        }
    }

    if volume_size < MIN_POOL_SIZE as f64 {
        return Err(Error::VolumeSizeTooSmall);
    }

    if let Some(integration) = integration {
        if let Some(minimum) = integration
            .catalog
            .minimum_volume_size(integration.storage_type)
        {
            let minimum_bytes = K8S_UNITS.to_bytes(minimum.size, &minimum.unit);
            if (volume_size as u64) < minimum_bytes {
                return Err(Error::BelowStorageTypeMinimum {
                    label: minimum.label,
                    size: minimum.size,
                    unit: minimum.unit,
                });
            }
        }
    }

    let layout = Layout {
        nodes,
        volumes_per_node: volumes_per_node as u32,
        total_volumes: total_volumes as u64,
        volume_size_bytes: volume_size as u64,
    };

    debug!(?layout, "pool layout computed");
    Ok(layout)
}

/// Next pool name for a tenant that already has `existing_pools` pools.
pub fn generate_pool_name(existing_pools: usize) -> String {
    format!("pool-{}", existing_pools)
}
