//! Earnings Predictor
//!
//! Runs the fitted regression model on a prepared feature row, inverts
//! the target scaling, and clamps the result to a non-negative dollar
//! amount.

mod predictor;

pub use predictor::Predictor;

use thiserror::Error;

/// Errors during prediction. Deterministic given the inputs, so never
/// retried.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("model inference failed: {0}")]
    Model(#[from] artifact_store::ModelError),
}
