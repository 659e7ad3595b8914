//! Error types for the pool capacity planner

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning a pool layout or analyzing parity.
///
/// Every variant is an input-validation or allocation-infeasibility
/// outcome. All of them are recoverable by the caller re-submitting with
/// different inputs; none are fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // =========================================================================
    // Layout Planning Errors
    // =========================================================================
    /// Requested pool capacity is below the 1Gi minimum
    #[error("The pool size must be greater than 1Gi")]
    PoolSizeTooSmall,

    /// A drives-per-node count was supplied but is zero
    #[error("Number of drives must be at least 1")]
    DriveCountTooSmall,

    /// A numeric input is unusable (zero nodes, zero cluster budget,
    /// non-finite capacity value)
    #[error("Some provided data is invalid, please try again")]
    InvalidInput,

    /// Rounding volumes-per-node up pushed the allocation past the
    /// cluster-size budget
    #[error("We were not able to allocate this server")]
    UnableToAllocate,

    /// The computed volume size fell below the 1Gi administrative floor
    #[error("Disk size with this combination would be less than 1Gi, please try another combination")]
    VolumeSizeTooSmall,

    /// The computed volume size is below the marketplace catalog's minimum
    /// for the selected storage type
    #[error("For the {label} storage type the minimum volume size is {size}{unit}")]
    BelowStorageTypeMinimum {
        label: String,
        size: f64,
        unit: String,
    },

    // =========================================================================
    // Erasure Analysis Errors
    // =========================================================================
    /// No parity options were supplied to the analyzer
    #[error("No parity values available")]
    EmptyParityList,

    /// A parity option string does not have the "EC:N" shape
    #[error("Invalid parity code: {0}")]
    InvalidParityCode(String),

    // =========================================================================
    // Memory Planning Errors
    // =========================================================================
    /// No memory at all is available on the selected nodes
    #[error("There is no memory available for the selected number of nodes")]
    NoMemoryAvailable,

    /// Available memory is below the 2Gi service minimum
    #[error("There are not enough memory resources available")]
    InsufficientMemory,

    /// Requested memory is below the 2Gi service minimum
    #[error("The requested memory size must be greater than 2Gi")]
    MemoryRequestTooSmall,

    /// Requested memory exceeds what the selected nodes can provide
    #[error("The requested memory is greater than the max available memory for the selected number of nodes")]
    MemoryRequestExceedsAvailable,
}

impl Error {
    /// Legacy numeric code carried by the erasure analyzer's wire format.
    ///
    /// Older consumers read analyzer failures as an integer field where 0
    /// meant success and 1 meant "no parity data available". Callers that
    /// still speak that convention can map analyzer errors through here.
    pub fn analyzer_code(&self) -> u32 {
        match self {
            Error::EmptyParityList => 1,
            Error::InvalidParityCode(_) => 2,
            _ => 0,
        }
    }
}
