//! Outlier Clamping (Winsorization)

use crate::schema::{Column, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};

/// Clamp bounds for one column, resolved at training time from the
/// empirical clip fractions. Invariant: `lower <= upper`, checked when
/// the store is assembled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClipBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ClipBounds {
    /// Pull a value inside the bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// Per-column clamp bounds for the winsorized columns, aligned to the
/// schema order. Columns without an entry (channel age) are never
/// clipped.
#[derive(Debug, Clone)]
pub struct WinsorLimits {
    bounds: [Option<ClipBounds>; FEATURE_DIMENSION],
}

impl WinsorLimits {
    /// Build from per-column bounds; columns not listed are unclipped
    pub fn from_entries(entries: &[(Column, ClipBounds)]) -> Self {
        let mut bounds = [None; FEATURE_DIMENSION];
        for (column, clip) in entries {
            bounds[column.index()] = Some(*clip);
        }
        Self { bounds }
    }

    /// Clamp bounds for a column, None if the column is unclipped
    pub fn bounds(&self, column: Column) -> Option<&ClipBounds> {
        self.bounds[column.index()].as_ref()
    }
}
