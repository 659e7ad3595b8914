//! Byte/unit conversion between magnitudes and base-1024 unit symbols.
//!
//! Two unit systems are supported: the generic binary-prefixed symbols
//! (`B`, `KiB`, ... `YiB`) and the Kubernetes resource-quantity symbols
//! (`B`, `Ki`, ... `Ei`). Both scale by 1024 per step. The tables are
//! explicit values passed into every conversion, so adding a unit system
//! never touches the calculation logic.
//!
//! Conversions are inverses only up to the chosen rounding policy:
//! `from_bytes(to_bytes(x, u))` is a display approximation of `x`, not a
//! lossless round trip.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An ordered table of unit labels, one per power of 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSystem {
    labels: &'static [&'static str],
}

/// Generic binary-prefixed units, B through YiB.
pub const BINARY_UNITS: UnitSystem = UnitSystem {
    labels: &[
        "B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB",
    ],
};

/// Kubernetes resource-quantity units, B through Ei.
pub const K8S_UNITS: UnitSystem = UnitSystem {
    labels: &["B", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"],
};

/// A byte count scaled down to a human-sized magnitude and unit label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaledBytes {
    /// Magnitude in the selected unit
    pub value: f64,
    /// Unit label from the system's table
    pub unit: String,
}

impl UnitSystem {
    /// The ordered unit labels of this system.
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Ordinal position of a unit label, if the system knows it.
    pub fn position(&self, unit: &str) -> Option<usize> {
        self.labels.iter().position(|l| *l == unit)
    }

    /// Convert a magnitude and unit label to an absolute byte count.
    ///
    /// An unrecognized unit label yields 0 rather than an error; callers
    /// that need to distinguish "0 bytes" from "unknown unit" must
    /// validate the label with [`UnitSystem::position`] first.
    pub fn to_bytes(&self, value: f64, unit: &str) -> u64 {
        let Some(pow) = self.position(unit) else {
            return 0;
        };
        let total = value * 1024f64.powi(pow as i32);
        if total.is_finite() && total > 0.0 {
            total as u64
        } else {
            0
        }
    }

    /// Convert a byte count to a magnitude in the largest unit that keeps
    /// it below 1024.
    ///
    /// `round_down` floors the magnitude before formatting; otherwise the
    /// literal quotient is kept. `show_decimals` keeps one fractional
    /// digit, else none.
    pub fn from_bytes(&self, bytes: u64, show_decimals: bool, round_down: bool) -> ScaledBytes {
        if bytes == 0 {
            return ScaledBytes {
                value: 0.0,
                unit: self.labels[0].to_string(),
            };
        }

        let mut value = bytes as f64;
        let mut index = 0;
        while value >= 1024.0 && index < self.labels.len() - 1 {
            value /= 1024.0;
            index += 1;
        }

        let rounded = if round_down { value.floor() } else { value };
        let scale = if show_decimals { 10.0 } else { 1.0 };
        let value = (rounded * scale).round() / scale;

        ScaledBytes {
            value,
            unit: self.labels[index].to_string(),
        }
    }
}

/// One-decimal human display of a byte count, e.g. `"2.5 GiB"`.
pub fn nice_bytes(bytes: u64, k8s_labels: bool) -> String {
    let system = if k8s_labels { K8S_UNITS } else { BINARY_UNITS };
    let mut value = bytes as f64;
    let mut index = 0;
    while value >= 1024.0 && index < system.labels.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    format!("{:.1} {}", value, system.labels[index])
}
