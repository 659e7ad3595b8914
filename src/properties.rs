//! Property-Based Tests for the Planner and Analyzer
//!
//! Uses proptest to verify the planner's invariants across a wide range
//! of capacities, node counts, and drive configurations.
//!
//! # Test Properties
//!
//! 1. **Volume Arithmetic**: total volumes = volumes per node x nodes
//! 2. **Budget**: allocations never exceed the cluster budget
//! 3. **Forced Drives**: a pinned drive count is never rounded
//! 4. **Determinism**: identical inputs give identical results
//! 5. **Unit Safety**: unknown units always convert to zero

#![cfg(test)]

use proptest::prelude::*;

use crate::catalog::Integration;
use crate::erasure::analyze_parity;
use crate::planner::{plan_layout, CapacityRequest, LayoutConstraints, MIN_POOL_SIZE};
use crate::units::{BINARY_UNITS, K8S_UNITS};

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for pool capacities from 1Gi up to 4Pi, in Gi.
fn capacity_gib_strategy() -> impl Strategy<Value = u64> {
    1u64..=(4 << 20)
}

/// Strategy for realistic node counts.
fn nodes_strategy() -> impl Strategy<Value = u32> {
    1u32..=32
}

/// Strategy for pinned drive counts.
fn drives_strategy() -> impl Strategy<Value = u32> {
    1u32..=16
}

fn request(gib: u64) -> CapacityRequest {
    CapacityRequest::new(gib as f64, "Gi")
}

fn unconstrained(nodes: u32, drives: Option<u32>) -> LayoutConstraints {
    LayoutConstraints {
        nodes,
        drives_per_node: drives,
        max_cluster_bytes: u64::MAX,
    }
}

// =============================================================================
// Planner Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: Successful layouts satisfy total = per-node x nodes and
    /// keep every volume at or above the 1Gi floor.
    #[test]
    fn prop_layout_volume_arithmetic(
        gib in capacity_gib_strategy(),
        nodes in nodes_strategy(),
    ) {
        if let Ok(layout) = plan_layout(&request(gib), &unconstrained(nodes, None), None) {
            prop_assert_eq!(
                layout.total_volumes,
                layout.volumes_per_node as u64 * layout.nodes as u64
            );
            prop_assert!(layout.volume_size_bytes >= MIN_POOL_SIZE);
            prop_assert!(layout.volumes_per_node >= 1);
        }
    }

    /// Property: The allocation never exceeds the caller's budget when a
    /// finite budget is given.
    #[test]
    fn prop_layout_respects_budget(
        gib in capacity_gib_strategy(),
        nodes in nodes_strategy(),
        headroom_gib in 0u64..=1024,
    ) {
        let budget = (gib + headroom_gib) * MIN_POOL_SIZE;
        let constraints = LayoutConstraints {
            nodes,
            drives_per_node: None,
            max_cluster_bytes: budget,
        };
        if let Ok(layout) = plan_layout(&request(gib), &constraints, None) {
            prop_assert!(
                layout.volume_size_bytes * layout.total_volumes <= budget,
                "allocation {} over budget {}",
                layout.volume_size_bytes * layout.total_volumes,
                budget
            );
        }
    }

    /// Property: Forced drives are adopted verbatim, never rounded.
    #[test]
    fn prop_forced_drives_exact(
        gib in capacity_gib_strategy(),
        nodes in nodes_strategy(),
        drives in drives_strategy(),
    ) {
        if let Ok(layout) = plan_layout(&request(gib), &unconstrained(nodes, Some(drives)), None) {
            prop_assert_eq!(layout.volumes_per_node, drives);
            prop_assert_eq!(layout.total_volumes, drives as u64 * nodes as u64);
        }
    }

    /// Property: Planning is a pure function; repeat calls agree.
    #[test]
    fn prop_planning_deterministic(
        gib in capacity_gib_strategy(),
        nodes in nodes_strategy(),
    ) {
        let constraints = unconstrained(nodes, None);
        let first = plan_layout(&request(gib), &constraints, None);
        let second = plan_layout(&request(gib), &constraints, None);
        prop_assert_eq!(first, second);
    }

    /// Property: Anything below 1Gi fails with the pool-size error.
    #[test]
    fn prop_sub_gi_pools_rejected(
        mib in 0u64..1024,
        nodes in nodes_strategy(),
    ) {
        let request = CapacityRequest::new(mib as f64, "Mi");
        let result = plan_layout(&request, &unconstrained(nodes, None), None);
        prop_assert_eq!(result, Err(crate::Error::PoolSizeTooSmall));
    }

    /// Property: A catalog with no opinion on the storage type never
    /// changes the outcome.
    #[test]
    fn prop_unconstrained_catalog_is_transparent(
        gib in capacity_gib_strategy(),
        nodes in nodes_strategy(),
    ) {
        let catalog = crate::MarketplaceConfiguration::default();
        let bare = plan_layout(&request(gib), &unconstrained(nodes, None), None);
        let with_catalog = plan_layout(
            &request(gib),
            &unconstrained(nodes, None),
            Some(Integration { catalog: &catalog, storage_type: "anything" }),
        );
        prop_assert_eq!(bare, with_catalog);
    }
}

// =============================================================================
// Analyzer Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: Usable capacity never exceeds raw capacity and the
    /// storage factor never drops below 1.
    #[test]
    fn prop_usable_capacity_bounded(
        parities in prop::collection::vec(1u32..=8, 1..6),
        drives in 4u64..=64,
        volume_gib in 1u64..=1024,
    ) {
        let options: Vec<String> = parities.iter().map(|p| format!("EC:{}", p)).collect();
        let volume_size = volume_gib * MIN_POOL_SIZE;
        let summary = analyze_parity(&options, drives, volume_size)?;

        prop_assert_eq!(summary.raw_capacity_bytes, drives * volume_size);
        for option in &summary.options {
            prop_assert!(option.storage_factor >= 1.0);
            prop_assert!(option.usable_capacity_bytes <= summary.raw_capacity_bytes);
            prop_assert!(option.max_failure_tolerations <= drives);
        }
    }

    /// Property: The stripe set is twice the strongest parity on offer.
    #[test]
    fn prop_stripe_set_tracks_max_parity(
        parities in prop::collection::vec(1u32..=8, 1..6),
    ) {
        let options: Vec<String> = parities.iter().map(|p| format!("EC:{}", p)).collect();
        let summary = analyze_parity(&options, 16, MIN_POOL_SIZE)?;
        let max = parities.iter().copied().max().unwrap();
        prop_assert_eq!(summary.erasure_stripe_set_size, max * 2);
        prop_assert_eq!(summary.max_ec, format!("EC:{}", max));
    }
}

// =============================================================================
// Unit Conversion Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: Unknown unit symbols convert to zero for any magnitude.
    #[test]
    fn prop_unknown_units_zero(value in 0.0f64..1e12) {
        prop_assert_eq!(K8S_UNITS.to_bytes(value, "furlongs"), 0);
        prop_assert_eq!(BINARY_UNITS.to_bytes(value, "Gi"), 0);
        prop_assert_eq!(K8S_UNITS.to_bytes(value, "GiB"), 0);
    }

    /// Property: Whole-Gi values round-trip exactly under floor rounding.
    #[test]
    fn prop_whole_gi_round_trip(gib in 1u64..1024) {
        let bytes = K8S_UNITS.to_bytes(gib as f64, "Gi");
        let scaled = K8S_UNITS.from_bytes(bytes, false, true);
        prop_assert_eq!(scaled.value, gib as f64);
        prop_assert_eq!(scaled.unit, "Gi");
    }

    /// Property: Scaling down never produces a magnitude of 1024 or more
    /// unless the table ran out of labels.
    #[test]
    fn prop_from_bytes_magnitude_bounded(bytes in 0u64..(1u64 << 60)) {
        let scaled = K8S_UNITS.from_bytes(bytes, false, true);
        prop_assert!(scaled.value < 1024.0, "{:?}", scaled);
    }
}
