//! Regression Model Evaluation

use crate::schema::FEATURE_DIMENSION;
use crate::ArtifactError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tract_onnx::prelude::*;

/// Errors while running the regressor on a feature row
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("inference failed: {0}")]
    Run(String),
    #[error("model produced no output")]
    EmptyOutput,
    #[error("input row has {actual} values, model expects {expected}")]
    InputDimension { expected: usize, actual: usize },
}

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Linear regressor stored as JSON (`model.json`). Covers linear-booster
/// exports and synthetic models injected by tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn predict(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row)
            .map(|(c, v)| c * v)
            .sum::<f64>()
            + self.intercept
    }
}

enum ModelKind {
    Onnx(OnnxPlan),
    Linear(LinearModel),
}

/// Opaque regressor mapping one feature row to one scaled prediction
/// scalar. The output is in the scaled target unit; callers invert the
/// target scaler themselves.
pub struct Model {
    kind: ModelKind,
}

impl Model {
    /// Load an ONNX graph and optimize it for a 1 x FEATURE_DIMENSION
    /// f32 input
    pub fn from_onnx(path: &Path) -> Result<Self, ArtifactError> {
        let plan = load_plan(path)
            .map_err(|e| ArtifactError::ModelLoad(format!("{}: {e}", path.display())))?;
        Ok(Self {
            kind: ModelKind::Onnx(plan),
        })
    }

    /// Wrap a JSON linear regressor
    pub fn linear(model: LinearModel) -> Self {
        Self {
            kind: ModelKind::Linear(model),
        }
    }

    /// Artifact format of the loaded model
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ModelKind::Onnx(_) => "onnx",
            ModelKind::Linear(_) => "linear",
        }
    }

    /// Run the regressor on one feature row, returning the scaled scalar
    pub fn predict_scaled(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != FEATURE_DIMENSION {
            return Err(ModelError::InputDimension {
                expected: FEATURE_DIMENSION,
                actual: row.len(),
            });
        }

        match &self.kind {
            ModelKind::Linear(model) => Ok(model.predict(row)),
            ModelKind::Onnx(plan) => {
                let input = tract_ndarray::Array2::from_shape_fn(
                    (1, FEATURE_DIMENSION),
                    |(_, column)| row[column] as f32,
                );
                let outputs = plan
                    .run(tvec!(Tensor::from(input).into()))
                    .map_err(|e| ModelError::Run(e.to_string()))?;
                let first = outputs.first().ok_or(ModelError::EmptyOutput)?;
                let view = first
                    .to_array_view::<f32>()
                    .map_err(|e| ModelError::Run(e.to_string()))?;
                let scaled = view.iter().next().copied().ok_or(ModelError::EmptyOutput)?;
                Ok(f64::from(scaled))
            }
        }
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model({})", self.kind_name())
    }
}

fn load_plan(path: &Path) -> TractResult<OnnxPlan> {
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(
            0,
            InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_DIMENSION)),
        )?
        .into_optimized()?
        .into_runnable()
}
