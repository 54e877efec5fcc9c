//! Feature Preparation Pipeline
//!
//! Transforms raw channel statistics into the exact numeric feature row
//! the earnings model was trained on: country lookup, derived ratios,
//! label encoding, outlier clamping, and standardization, in training
//! order.

mod features;
mod input;

pub use features::{FeatureBuilder, FeatureVector};
pub use input::RawInput;

use thiserror::Error;

/// Errors while building features for a request. Both are recoverable
/// only by the caller re-prompting; the pipeline never retries.
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// No reference-table row for the requested country
    #[error("unknown country: '{0}' has no reference entry")]
    UnknownCountry(String),
    /// No encoder mapping for the requested country
    #[error("unseen category: '{0}' has no encoder mapping")]
    UnseenCategory(String),
}
