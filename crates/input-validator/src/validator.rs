//! Input Validator for Range Checking

use crate::error::ValidationError;
use feature_builder::RawInput;
use serde::{Deserialize, Serialize};

/// Bounds policy for each raw input field. Minima are zero so the
/// pipeline's zero-guard paths (no views, brand-new channel) stay
/// reachable; maxima track the most extreme channels in the training
/// population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Lifetime subscriber range
    pub subscribers_range: (u64, u64),
    /// Lifetime view range
    pub total_views_range: (u64, u64),
    /// Channel age range (years)
    pub channel_age_years_range: (u64, u64),
    /// Views in the last 30 days
    pub views_last_30_days_range: (u64, u64),
    /// Subscribers gained in the last 30 days
    pub subscribers_last_30_days_range: (u64, u64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            subscribers_range: (0, 289_000_000),
            total_views_range: (0, 104_005_600_000),
            channel_age_years_range: (0, 19),
            views_last_30_days_range: (0, 3_592_000_000),
            subscribers_last_30_days_range: (0, 27_000_000),
        }
    }
}

/// Result of validating one request
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether every field is in range
    pub valid: bool,
    /// One error per out-of-range field
    pub errors: Vec<ValidationError>,
    /// Number of fields checked
    pub fields_checked: usize,
}

/// Validator for raw channel statistics
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: u64,
        range: (u64, u64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate every bounded field, collecting all violations rather
    /// than stopping at the first
    pub fn validate(&self, raw: &RawInput) -> ValidationResult {
        let checks = [
            self.validate_range("subscribers", raw.subscribers, self.config.subscribers_range),
            self.validate_range("total_views", raw.total_views, self.config.total_views_range),
            self.validate_range(
                "channel_age_years",
                u64::from(raw.channel_age_years),
                self.config.channel_age_years_range,
            ),
            self.validate_range(
                "views_last_30_days",
                raw.views_last_30_days,
                self.config.views_last_30_days_range,
            ),
            self.validate_range(
                "subscribers_last_30_days",
                raw.subscribers_last_30_days,
                self.config.subscribers_last_30_days_range,
            ),
        ];

        let fields_checked = checks.len();
        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RawInput {
        RawInput {
            subscribers: 100_000,
            total_views: 10_000_000,
            country: "Brazil".to_string(),
            channel_age_years: 5,
            views_last_30_days: 500_000,
            subscribers_last_30_days: 2_000,
        }
    }

    #[test]
    fn test_in_range_input_is_valid() {
        let result = Validator::default().validate(&input());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.fields_checked, 5);
    }

    #[test]
    fn test_boundary_values_are_valid() {
        let validator = Validator::default();
        let mut raw = input();
        raw.subscribers = 289_000_000;
        raw.total_views = 104_005_600_000;
        raw.channel_age_years = 19;
        raw.views_last_30_days = 3_592_000_000;
        raw.subscribers_last_30_days = 27_000_000;
        assert!(validator.validate(&raw).valid);

        raw.subscribers = 0;
        raw.total_views = 0;
        raw.channel_age_years = 0;
        raw.views_last_30_days = 0;
        raw.subscribers_last_30_days = 0;
        assert!(validator.validate(&raw).valid);
    }

    #[test]
    fn test_each_violation_is_reported() {
        let validator = Validator::default();
        let mut raw = input();
        raw.subscribers = 289_000_001;
        raw.channel_age_years = 20;
        let result = validator.validate(&raw);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(
            |e| matches!(e, ValidationError::OutOfRange { field, .. } if *field == "subscribers")
        ));
        assert!(result.errors.iter().any(
            |e| matches!(e, ValidationError::OutOfRange { field, .. } if *field == "channel_age_years")
        ));
    }

    #[test]
    fn test_custom_bounds() {
        let validator = Validator::new(ValidationConfig {
            subscribers_range: (10, 20),
            ..ValidationConfig::default()
        });
        let mut raw = input();
        raw.subscribers = 5;
        assert!(!validator.validate(&raw).valid);
        raw.subscribers = 15;
        assert!(validator.validate(&raw).valid);
    }
}
