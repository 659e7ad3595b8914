//! Erasure-code parity trade-off analyzer.
//!
//! Given the planner's drive count and volume size plus the parity
//! configurations the deployment supports ("EC:N" codes), computes the
//! usable capacity and fault tolerance each configuration would yield,
//! and picks a sensible default.
//!
//! The stripe set spans twice the maximum supported parity; each parity
//! level then costs `ess / (ess - parity)` in raw-to-usable overhead.
//! Capacity and toleration outputs are floored integers; the storage
//! factor itself is kept in full precision for the division.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Parity code preferred as the default when the deployment supports it.
pub const DEFAULT_PARITY: &str = "EC:4";

// =============================================================================
// Value Objects
// =============================================================================

/// Capacity and fault-tolerance figures for one parity configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParityAnalysis {
    /// The "EC:N" code this row describes
    pub erasure_code: String,

    /// Raw-to-usable capacity ratio imposed by this parity level; >= 1
    pub storage_factor: f64,

    /// Usable capacity after parity overhead, floored
    pub usable_capacity_bytes: u64,

    /// Drives that may fail without data loss
    pub max_failure_tolerations: u64,
}

/// Full parity analysis across all supported configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErasureSummary {
    /// One analysis per supported parity option, in the caller's order
    pub options: Vec<ParityAnalysis>,

    /// The most protective supported option
    pub max_ec: String,

    /// The recommended default ("EC:4" when supported, else `max_ec`)
    pub default_ec: String,

    /// Drives participating in one erasure-coded group
    pub erasure_stripe_set_size: u32,

    /// Total raw capacity: drives x volume size
    pub raw_capacity_bytes: u64,
}

// =============================================================================
// Analyzer
// =============================================================================

/// Analyze every supported parity configuration for a pool layout.
///
/// An empty option list is the distinct "no parity data available"
/// failure ([`Error::EmptyParityList`], legacy analyzer code 1), not a
/// computational error. Malformed codes fail with
/// [`Error::InvalidParityCode`].
pub fn analyze_parity(
    parity_options: &[String],
    total_drives: u64,
    volume_size_bytes: u64,
) -> Result<ErasureSummary> {
    if parity_options.is_empty() {
        return Err(Error::EmptyParityList);
    }

    let parities = parity_options
        .iter()
        .map(|code| Ok((code.as_str(), parity_count(code)?)))
        .collect::<Result<Vec<_>>>()?;

    let raw_capacity_bytes = total_drives.saturating_mul(volume_size_bytes);

    // Most protective option; first occurrence wins ties so a caller
    // listing the maximum first keeps that element as max_ec.
    let (max_ec, max_parity) = parities
        .iter()
        .copied()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .expect("non-empty by the check above");

    let erasure_stripe_set_size = max_parity * 2;

    debug!(
        max_ec,
        erasure_stripe_set_size, raw_capacity_bytes, "analyzing parity options"
    );

    let options = parities
        .iter()
        .map(|&(code, parity)| {
            let storage_factor =
                erasure_stripe_set_size as f64 / (erasure_stripe_set_size - parity) as f64;

            let usable_capacity_bytes = (raw_capacity_bytes as f64 / storage_factor).floor();
            let max_failure_tolerations =
                total_drives - (total_drives as f64 / storage_factor).floor() as u64;

            ParityAnalysis {
                erasure_code: code.to_string(),
                storage_factor,
                usable_capacity_bytes: usable_capacity_bytes as u64,
                max_failure_tolerations,
            }
        })
        .collect();

    let default_ec = if parity_options.iter().any(|code| code == DEFAULT_PARITY) {
        DEFAULT_PARITY.to_string()
    } else {
        max_ec.to_string()
    };

    Ok(ErasureSummary {
        options,
        max_ec: max_ec.to_string(),
        default_ec,
        erasure_stripe_set_size,
        raw_capacity_bytes,
    })
}

/// Parse the parity shard count out of an "EC:N" code.
fn parity_count(code: &str) -> Result<u32> {
    code.split_once(':')
        .and_then(|(_, n)| n.parse::<u32>().ok())
        .ok_or_else(|| Error::InvalidParityCode(code.to_string()))
}
