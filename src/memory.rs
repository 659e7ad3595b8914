//! Memory request/limit planner for pool nodes.
//!
//! Converts a requested per-node memory size into a Kubernetes
//! request/limit pair. The limit is floored by pool capacity: larger
//! pools need more page cache headroom, so the limit rises in steps at
//! 1Ti, 10Ti, 100Ti and 1Pi of pool capacity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::units::K8S_UNITS;

/// Minimum memory the service runs with: 2Gi.
pub const MIN_MEMORY_SIZE: u64 = 2 << 30;

/// A planned memory request/limit pair, both in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResource {
    /// Memory request in bytes
    pub request_bytes: u64,

    /// Memory limit in bytes; never below the request
    pub limit_bytes: u64,
}

/// Capacity thresholds and the memory limit floor each one buys.
/// Ordered largest first; the first threshold at or below the pool
/// capacity wins.
const LIMIT_TIERS: [(u64, u64); 4] = [
    (1 << 50, 64 << 30), // >= 1Pi  -> 64Gi
    (100 << 40, 32 << 30), // >= 100Ti -> 32Gi
    (10 << 40, 16 << 30), // >= 10Ti  -> 16Gi
    (1 << 40, 8 << 30),  // >= 1Ti   -> 8Gi
];

/// Plan the memory request and limit for a node.
///
/// `requested_gib` is the user-entered per-node memory in Gi,
/// `capacity_bytes` the pool's usable capacity, and `max_memory_bytes`
/// the memory actually available on the selected nodes.
pub fn plan_memory(
    requested_gib: u64,
    capacity_bytes: u64,
    max_memory_bytes: u64,
) -> Result<MemoryResource> {
    let request_bytes = K8S_UNITS.to_bytes(requested_gib as f64, "Gi");

    if max_memory_bytes == 0 {
        return Err(Error::NoMemoryAvailable);
    }

    if max_memory_bytes < MIN_MEMORY_SIZE {
        return Err(Error::InsufficientMemory);
    }

    if request_bytes < MIN_MEMORY_SIZE {
        return Err(Error::MemoryRequestTooSmall);
    }

    if request_bytes > max_memory_bytes {
        return Err(Error::MemoryRequestExceedsAvailable);
    }

    let mut limit_bytes = request_bytes;
    for (threshold, floor) in LIMIT_TIERS {
        if capacity_bytes >= threshold {
            limit_bytes = u64::max(request_bytes, floor);
            break;
        }
    }

    debug!(request_bytes, limit_bytes, capacity_bytes, "memory planned");

    Ok(MemoryResource {
        request_bytes,
        limit_bytes,
    })
}
