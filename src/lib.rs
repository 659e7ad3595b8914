//! PoolPlan - Capacity Layout Planner for Object Storage Pools
//!
//! Computes feasible physical layouts (nodes, drives per node, volume
//! size) for distributed object-storage cluster pools from a desired
//! usable capacity, and derives the erasure-coding parity trade-offs
//! (capacity vs. fault tolerance) each layout supports.
//!
//! # Architecture
//!
//! Two components, the second consuming the first's output:
//!
//! ```text
//! CapacityRequest ──▶ Layout Planner ──▶ Layout ──▶ Parity Analyzer ──▶ ErasureSummary
//! ```
//!
//! Both are pure, synchronous functions over their arguments: no I/O, no
//! shared state, no blocking. Failures are typed errors a caller can
//! recover from by re-prompting, never exceptions or partial results.
//!
//! # Modules
//!
//! - [`catalog`] - Marketplace storage-type catalog port and adapter
//! - [`erasure`] - Erasure-code parity trade-off analyzer
//! - [`error`] - Error types
//! - [`memory`] - Memory request/limit planner for pool nodes
//! - [`planner`] - Pool layout planner
//! - [`units`] - Byte/unit conversion tables and helpers

pub mod catalog;
pub mod erasure;
pub mod error;
pub mod memory;
pub mod planner;
pub mod units;

#[cfg(test)]
mod properties;

// Re-export commonly used types
pub use catalog::{Integration, MarketplaceConfiguration, MinimumVolumeSize, StorageTypeCatalog};
pub use erasure::{analyze_parity, ErasureSummary, ParityAnalysis};
pub use error::{Error, Result};
pub use memory::{plan_memory, MemoryResource};
pub use planner::{generate_pool_name, plan_layout, CapacityRequest, Layout, LayoutConstraints};
pub use units::{nice_bytes, ScaledBytes, UnitSystem, BINARY_UNITS, K8S_UNITS};
