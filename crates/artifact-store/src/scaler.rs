//! Feature and Target Standardization

use crate::schema::{Column, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};

/// Affine constants for one column, fit at training time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Affine {
    pub mean: f64,
    pub scale: f64,
}

impl Affine {
    /// Forward transform to zero mean and unit scale
    pub fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    /// Inverse transform back to the original unit
    pub fn inverse(&self, value: f64) -> f64 {
        value * self.scale + self.mean
    }
}

/// Column-wise standardizer for the feature row.
///
/// Holds one affine per scaled column, aligned to the schema order.
/// Columns without an entry (channel age) pass through untouched.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    params: [Option<Affine>; FEATURE_DIMENSION],
}

impl StandardScaler {
    /// Build from per-column affines; columns not listed are unscaled
    pub fn from_entries(entries: &[(Column, Affine)]) -> Self {
        let mut params = [None; FEATURE_DIMENSION];
        for (column, affine) in entries {
            params[column.index()] = Some(*affine);
        }
        Self { params }
    }

    /// Affine constants for a column, None if the column is unscaled
    pub fn affine(&self, column: Column) -> Option<&Affine> {
        self.params[column.index()].as_ref()
    }
}

/// Affine transform fit on the training target (earnings). Only the
/// inverse direction is used at inference time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetScaler {
    pub mean: f64,
    pub scale: f64,
}

impl TargetScaler {
    /// Map a scaled model output back to the original earnings unit
    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * self.scale + self.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_and_inverse() {
        let affine = Affine {
            mean: 100.0,
            scale: 50.0,
        };
        assert_eq!(affine.standardize(200.0), 2.0);
        assert_eq!(affine.inverse(2.0), 200.0);
    }

    #[test]
    fn test_unlisted_column_has_no_affine() {
        let scaler = StandardScaler::from_entries(&[(
            Column::Subscribers,
            Affine {
                mean: 0.0,
                scale: 1.0,
            },
        )]);
        assert!(scaler.affine(Column::Subscribers).is_some());
        assert!(scaler.affine(Column::ChannelAgeYears).is_none());
    }

    #[test]
    fn test_target_inverse() {
        let target = TargetScaler {
            mean: 1500.0,
            scale: 3000.0,
        };
        assert_eq!(target.inverse(0.0), 1500.0);
        assert_eq!(target.inverse(-1.0), -1500.0);
    }
}
