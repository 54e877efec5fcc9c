//! Earnings Prediction

use crate::PredictionError;
use artifact_store::ArtifactStore;
use feature_builder::FeatureVector;
use std::sync::Arc;
use tracing::debug;

/// Runs the regression model on a prepared feature row and maps the
/// scaled output back to the original earnings unit (USD per month).
pub struct Predictor {
    store: Arc<ArtifactStore>,
}

impl Predictor {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// Estimate monthly earnings for a prepared feature row.
    ///
    /// The regressor is unconstrained and may go negative for extreme or
    /// out-of-distribution inputs; earnings are clamped at zero.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let start = std::time::Instant::now();

        let scaled = self.store.model().predict_scaled(features.values())?;
        let earnings = self.store.target_scaler().inverse(scaled);

        debug!(
            scaled,
            earnings,
            latency_us = start.elapsed().as_micros() as u64,
            "prediction complete"
        );

        Ok(earnings.max(0.0))
    }
}
