//! Training Artifact Store
//!
//! Loads, validates, and holds the transform artifacts and regression model
//! produced by the offline training pipeline. A constructed store proves
//! that every artifact was read and cross-validated against the built-in
//! feature schema; it is shared read-only across requests for the process
//! lifetime.

mod country;
mod encoder;
mod model;
mod scaler;
mod schema;
mod store;
mod winsor;

pub use country::{CountryReference, CountryStats};
pub use encoder::CountryEncoder;
pub use model::{LinearModel, Model, ModelError};
pub use scaler::{Affine, StandardScaler, TargetScaler};
pub use schema::{Column, FEATURE_DIMENSION};
pub use store::ArtifactStore;
pub use winsor::{ClipBounds, WinsorLimits};

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or validating artifacts. All fatal at startup:
/// the process must refuse to serve predictions on any of these.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("{artifact}: schema mismatch: expected [{expected}], got [{actual}]")]
    SchemaMismatch {
        artifact: &'static str,
        expected: String,
        actual: String,
    },
    #[error("country vocabulary mismatch: {0}")]
    VocabularyMismatch(String),
    #[error("model load failed: {0}")]
    ModelLoad(String),
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
}
