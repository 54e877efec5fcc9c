//! Artifact Loading and Cross-Validation

use crate::country::CountryReference;
use crate::encoder::CountryEncoder;
use crate::model::{LinearModel, Model};
use crate::scaler::{Affine, StandardScaler, TargetScaler};
use crate::schema::{Column, FEATURE_DIMENSION};
use crate::winsor::{ClipBounds, WinsorLimits};
use crate::ArtifactError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

// Artifact file names fixed by the training pipeline
const COLUMNS_FILE: &str = "columns.json";
const SCALER_FILE: &str = "scaler.json";
const TARGET_SCALER_FILE: &str = "target_scaler.json";
const WINSOR_FILE: &str = "winsor_limits.json";
const ENCODER_FILE: &str = "country_encoder.json";
const COUNTRIES_FILE: &str = "countries.csv";
const ONNX_MODEL_FILE: &str = "model.onnx";
const LINEAR_MODEL_FILE: &str = "model.json";

/// On-disk shape of `scaler.json`
#[derive(Debug, Deserialize)]
struct ScalerFile {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// On-disk shape of `winsor_limits.json`
#[derive(Debug, Deserialize)]
struct WinsorFile {
    columns: BTreeMap<String, ClipBounds>,
}

/// On-disk shape of `country_encoder.json`
#[derive(Debug, Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

/// Process-wide store for every training-time artifact.
///
/// Construction is loading: a value of this type proves that every
/// artifact was read and cross-validated against the built-in schema.
/// Shared read-only (`Arc`) across requests; no writer exists after
/// load, so no locking is needed.
#[derive(Debug)]
pub struct ArtifactStore {
    feature_scaler: StandardScaler,
    target_scaler: TargetScaler,
    winsor_limits: WinsorLimits,
    encoder: CountryEncoder,
    countries: CountryReference,
    model: Model,
}

impl ArtifactStore {
    /// Load and validate every artifact from `dir`. Fails on the first
    /// missing, unparsable, or inconsistent artifact; the caller must
    /// treat any error as fatal and refuse to serve predictions.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        info!("loading artifacts from {}", dir.display());

        let columns: Vec<String> = read_json(&dir.join(COLUMNS_FILE))?;
        validate_columns(&columns)?;

        let scaler_file: ScalerFile = read_json(&dir.join(SCALER_FILE))?;
        let feature_scaler = build_scaler(scaler_file)?;

        let target_scaler: TargetScaler = read_json(&dir.join(TARGET_SCALER_FILE))?;

        let winsor_file: WinsorFile = read_json(&dir.join(WINSOR_FILE))?;
        let winsor_limits = build_winsor(winsor_file)?;

        let encoder_file: EncoderFile = read_json(&dir.join(ENCODER_FILE))?;
        let encoder = CountryEncoder::new(encoder_file.classes);

        let countries = CountryReference::from_csv(&dir.join(COUNTRIES_FILE))?;
        let model = load_model(dir)?;

        Self::from_parts(
            feature_scaler,
            target_scaler,
            winsor_limits,
            encoder,
            countries,
            model,
        )
    }

    /// Assemble a store from already-constructed artifacts, running the
    /// same cross-validation as `load`. This is the seam for injecting
    /// synthetic artifacts in tests.
    pub fn from_parts(
        feature_scaler: StandardScaler,
        target_scaler: TargetScaler,
        winsor_limits: WinsorLimits,
        encoder: CountryEncoder,
        countries: CountryReference,
        model: Model,
    ) -> Result<Self, ArtifactError> {
        validate_scaler_coverage(&feature_scaler)?;
        validate_winsor_coverage(&winsor_limits)?;
        validate_target_scaler(&target_scaler)?;
        validate_vocabulary(&encoder, &countries)?;

        info!(
            countries = countries.len(),
            model = model.kind_name(),
            "artifact store ready"
        );

        Ok(Self {
            feature_scaler,
            target_scaler,
            winsor_limits,
            encoder,
            countries,
            model,
        })
    }

    pub fn feature_scaler(&self) -> &StandardScaler {
        &self.feature_scaler
    }

    pub fn target_scaler(&self) -> &TargetScaler {
        &self.target_scaler
    }

    pub fn winsor_limits(&self) -> &WinsorLimits {
        &self.winsor_limits
    }

    pub fn encoder(&self) -> &CountryEncoder {
        &self.encoder
    }

    pub fn countries(&self) -> &CountryReference {
        &self.countries
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// The loaded column list must equal the built-in schema byte-for-byte;
/// positional drift here would mis-scale every downstream prediction
/// without raising an error.
fn validate_columns(columns: &[String]) -> Result<(), ArtifactError> {
    let expected = Column::names();
    let matches =
        columns.len() == expected.len() && columns.iter().zip(&expected).all(|(a, b)| a == b);
    if !matches {
        return Err(ArtifactError::SchemaMismatch {
            artifact: COLUMNS_FILE,
            expected: expected.join(", "),
            actual: columns.join(", "),
        });
    }
    Ok(())
}

fn build_scaler(file: ScalerFile) -> Result<StandardScaler, ArtifactError> {
    if file.columns.len() != file.mean.len() || file.columns.len() != file.scale.len() {
        return Err(ArtifactError::InvalidArtifact(format!(
            "{SCALER_FILE}: {} columns but {} means and {} scales",
            file.columns.len(),
            file.mean.len(),
            file.scale.len()
        )));
    }

    let mut entries = Vec::with_capacity(file.columns.len());
    for (name, (mean, scale)) in file
        .columns
        .iter()
        .zip(file.mean.iter().copied().zip(file.scale.iter().copied()))
    {
        let column = Column::from_name(name).ok_or_else(|| ArtifactError::SchemaMismatch {
            artifact: SCALER_FILE,
            expected: Column::names().join(", "),
            actual: name.clone(),
        })?;
        entries.push((column, Affine { mean, scale }));
    }
    Ok(StandardScaler::from_entries(&entries))
}

fn build_winsor(file: WinsorFile) -> Result<WinsorLimits, ArtifactError> {
    let mut entries = Vec::with_capacity(file.columns.len());
    for (name, bounds) in &file.columns {
        let column = Column::from_name(name).ok_or_else(|| ArtifactError::SchemaMismatch {
            artifact: WINSOR_FILE,
            expected: Column::names().join(", "),
            actual: name.clone(),
        })?;
        entries.push((column, *bounds));
    }
    Ok(WinsorLimits::from_entries(&entries))
}

fn load_model(dir: &Path) -> Result<Model, ArtifactError> {
    let onnx_path = dir.join(ONNX_MODEL_FILE);
    if onnx_path.exists() {
        return Model::from_onnx(&onnx_path);
    }

    let linear_path = dir.join(LINEAR_MODEL_FILE);
    if linear_path.exists() {
        let linear: LinearModel = read_json(&linear_path)?;
        if linear.coefficients.len() != FEATURE_DIMENSION {
            return Err(ArtifactError::SchemaMismatch {
                artifact: LINEAR_MODEL_FILE,
                expected: format!("{FEATURE_DIMENSION} coefficients"),
                actual: format!("{} coefficients", linear.coefficients.len()),
            });
        }
        return Ok(Model::linear(linear));
    }

    Err(ArtifactError::ModelLoad(format!(
        "neither {ONNX_MODEL_FILE} nor {LINEAR_MODEL_FILE} found in {}",
        dir.display()
    )))
}

/// Every scaled column must carry an affine with nonzero scale; the
/// unscaled column must carry none.
fn validate_scaler_coverage(scaler: &StandardScaler) -> Result<(), ArtifactError> {
    for column in Column::ALL {
        match (column.is_scaled(), scaler.affine(column)) {
            (true, Some(affine)) => {
                if affine.scale == 0.0 {
                    return Err(ArtifactError::InvalidArtifact(format!(
                        "scaler: zero scale for column '{}'",
                        column.name()
                    )));
                }
            }
            (true, None) => {
                return Err(ArtifactError::SchemaMismatch {
                    artifact: SCALER_FILE,
                    expected: format!("affine for column '{}'", column.name()),
                    actual: "missing".to_string(),
                });
            }
            (false, Some(_)) => {
                return Err(ArtifactError::SchemaMismatch {
                    artifact: SCALER_FILE,
                    expected: format!("no affine for column '{}'", column.name()),
                    actual: "present".to_string(),
                });
            }
            (false, None) => {}
        }
    }
    Ok(())
}

/// Every scaled column must carry clamp bounds with `lower <= upper`;
/// the unscaled column must carry none.
fn validate_winsor_coverage(limits: &WinsorLimits) -> Result<(), ArtifactError> {
    for column in Column::ALL {
        match (column.is_scaled(), limits.bounds(column)) {
            (true, Some(bounds)) => {
                if bounds.lower > bounds.upper {
                    return Err(ArtifactError::InvalidArtifact(format!(
                        "winsor limits: lower {} above upper {} for column '{}'",
                        bounds.lower,
                        bounds.upper,
                        column.name()
                    )));
                }
            }
            (true, None) => {
                return Err(ArtifactError::SchemaMismatch {
                    artifact: WINSOR_FILE,
                    expected: format!("bounds for column '{}'", column.name()),
                    actual: "missing".to_string(),
                });
            }
            (false, Some(_)) => {
                return Err(ArtifactError::SchemaMismatch {
                    artifact: WINSOR_FILE,
                    expected: format!("no bounds for column '{}'", column.name()),
                    actual: "present".to_string(),
                });
            }
            (false, None) => {}
        }
    }
    Ok(())
}

fn validate_target_scaler(target: &TargetScaler) -> Result<(), ArtifactError> {
    if target.scale == 0.0 {
        return Err(ArtifactError::InvalidArtifact(
            "target scaler: zero scale".to_string(),
        ));
    }
    Ok(())
}

/// The encoder classes and the reference table must describe the same
/// country set. A country the UI can offer but one of them cannot serve
/// is a contract violation between collaborators, surfaced here at load
/// time instead of per request.
fn validate_vocabulary(
    encoder: &CountryEncoder,
    countries: &CountryReference,
) -> Result<(), ArtifactError> {
    if encoder.is_empty() {
        return Err(ArtifactError::InvalidArtifact(
            "country vocabulary is empty".to_string(),
        ));
    }

    let encoded: BTreeSet<&str> = encoder.classes().iter().map(String::as_str).collect();
    let referenced: BTreeSet<&str> = countries.names().collect();

    if encoded != referenced {
        let missing: Vec<&str> = encoded.difference(&referenced).copied().collect();
        let extra: Vec<&str> = referenced.difference(&encoded).copied().collect();
        return Err(ArtifactError::VocabularyMismatch(format!(
            "encoded but not in reference table: [{}]; in reference table but not encoded: [{}]",
            missing.join(", "),
            extra.join(", ")
        )));
    }
    Ok(())
}
