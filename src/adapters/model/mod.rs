//! Model adapter: Implementation of RiskClassifier for an exported linear model.
//!
//! The training pipeline exports a standardized multinomial logistic
//! regression as JSON:
//!
//! ```json
//! {
//!   "schema_version": "v1",
//!   "feature_names": ["Gender", "Age", ...],
//!   "classes": ["Insufficient_Weight", ...],
//!   "scaler_mean": [...],
//!   "scaler_scale": [...],
//!   "coefficients": [[...], ...],
//!   "intercepts": [...]
//! }
//! ```
//!
//! # Integrity
//!
//! Loading checks every array shape against `feature_names` and `classes`,
//! verifies the declared columns against the schema version, and can pin the
//! file to a SHA-256 digest (see the `model_digest` binary).

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{EncodedFeatureVector, ObesityRisk, RiskPrediction, SchemaVersion};
use crate::ports::{ModelError, RiskClassifier};

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub schema_version: SchemaVersion,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    /// One row per class, one column per feature
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Linear obesity-risk classifier.
#[derive(Debug, Clone)]
pub struct LinearRiskModel {
    model: ExportedLinearModel,
    classes: Vec<ObesityRisk>,
}

impl LinearRiskModel {
    /// Build from already parsed parameters.
    ///
    /// # Errors
    /// Returns `ModelError` if shapes are inconsistent, a class label is
    /// unknown, or the columns do not match the declared schema.
    pub fn from_exported(model: ExportedLinearModel) -> Result<Self, ModelError> {
        let n = model.feature_names.len();
        let k = model.classes.len();

        if k < 2 {
            return Err(ModelError::Invalid(format!(
                "Model must have at least 2 classes, got {k}"
            )));
        }
        if model.scaler_mean.len() != n || model.scaler_scale.len() != n {
            return Err(ModelError::Invalid(
                "Scaler lengths do not match feature_names length".into(),
            ));
        }
        if model.coefficients.len() != k || model.intercepts.len() != k {
            return Err(ModelError::Invalid(
                "Coefficient rows / intercepts do not match classes length".into(),
            ));
        }
        if model.coefficients.iter().any(|row| row.len() != n) {
            return Err(ModelError::Invalid(
                "Coefficient row length does not match feature_names length".into(),
            ));
        }
        if model.scaler_scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(ModelError::Invalid("Scaler scale must be finite and non-zero".into()));
        }

        model
            .schema_version
            .verify_columns(model.feature_names.as_slice())?;

        let classes = model
            .classes
            .iter()
            .map(|label| {
                ObesityRisk::from_class_label(label)
                    .ok_or_else(|| ModelError::UnknownClass(label.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { model, classes })
    }

    /// Load model parameters from a JSON file.
    ///
    /// When `expected_sha256` is given, the file digest must match it.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, fails the digest pin, or is
    /// not a valid model.
    pub fn load(path: &Path, expected_sha256: Option<&str>) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ModelError::Load(format!("Failed to read {path:?}: {e}")))?;

        if let Some(expected) = expected_sha256 {
            let actual = sha256_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                return Err(ModelError::DigestMismatch {
                    expected: expected.trim().to_string(),
                    actual,
                });
            }
            tracing::debug!("Model digest verified");
        } else {
            tracing::warn!("Loading model {:?} without a pinned digest", path);
        }

        let exported: ExportedLinearModel = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::Load(format!("Invalid model JSON: {e}")))?;
        let model = Self::from_exported(exported)?;

        tracing::info!(
            "Loaded model from {:?} (schema={}, n_features={}, n_classes={})",
            path,
            model.model.schema_version,
            model.model.feature_names.len(),
            model.classes.len()
        );

        Ok(model)
    }

    /// Standardize raw features with the exported scaler.
    fn standardize(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter()
            .zip(&self.model.scaler_mean)
            .zip(&self.model.scaler_scale)
            .map(|((x, mean), scale)| (x - mean) / scale)
            .collect()
    }

    /// Class probabilities in `classes` order.
    ///
    /// # Errors
    /// Returns `ModelError::Schema` for a vector of another schema version.
    pub fn predict_proba(
        &self,
        features: &EncodedFeatureVector,
    ) -> Result<Vec<(ObesityRisk, f64)>, ModelError> {
        features.ensure_schema(self.model.schema_version)?;

        let x = self.standardize(features.values());
        let logits: Vec<f64> = self
            .model
            .coefficients
            .iter()
            .zip(&self.model.intercepts)
            .map(|(row, b)| row.iter().zip(&x).map(|(w, xi)| w * xi).sum::<f64>() + b)
            .collect();

        Ok(self.classes.iter().copied().zip(softmax(&logits)).collect())
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl RiskClassifier for LinearRiskModel {
    fn schema_version(&self) -> SchemaVersion {
        self.model.schema_version
    }

    fn feature_names(&self) -> Vec<String> {
        self.model.feature_names.clone()
    }

    fn predict(&self, features: &EncodedFeatureVector) -> Result<RiskPrediction, ModelError> {
        let probabilities = self.predict_proba(features)?;

        // Ties resolve to the earlier class, matching arg-max over class order.
        let (risk, confidence) = probabilities
            .into_iter()
            .fold(None, |best: Option<(ObesityRisk, f64)>, (risk, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((risk, p)),
            })
            .ok_or_else(|| ModelError::Invalid("Model has no classes".into()))?;

        tracing::debug!("Predicted {} (p={:.3})", risk, confidence);
        Ok(RiskPrediction { risk, confidence })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{column_names, SchemaMismatchError, FEATURE_COUNT};
    use tempfile::tempdir;

    /// Logits grow with standardized weight and shrink with standardized
    /// height, so heavier and shorter profiles land in higher classes.
    pub(crate) fn exported_model(schema: SchemaVersion) -> ExportedLinearModel {
        let classes: Vec<String> = ObesityRisk::ALL
            .iter()
            .map(|r| r.class_label().to_string())
            .collect();
        let coefficients = (0..classes.len())
            .map(|k| {
                let mut row = vec![0.0; FEATURE_COUNT];
                let centered = k as f64 - 3.0;
                row[2] = -centered; // Height
                row[3] = centered; // Weight
                row
            })
            .collect();
        let mut intercepts = vec![0.0; classes.len()];
        intercepts[1] = 1.0;

        ExportedLinearModel {
            schema_version: schema,
            feature_names: column_names(),
            classes,
            scaler_mean: {
                let mut m = vec![0.0; FEATURE_COUNT];
                m[2] = 1.7;
                m[3] = 70.0;
                m
            },
            scaler_scale: {
                let mut s = vec![1.0; FEATURE_COUNT];
                s[2] = 0.1;
                s[3] = 15.0;
                s
            },
            coefficients,
            intercepts,
        }
    }

    fn vector_with(height: f64, weight: f64, schema: SchemaVersion) -> EncodedFeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[2] = height;
        values[3] = weight;
        EncodedFeatureVector::from_values(schema, values)
    }

    #[test]
    fn test_heavier_is_riskier() {
        let model = LinearRiskModel::from_exported(exported_model(SchemaVersion::V1))
            .expect("Should build");
        let light = model
            .predict(&vector_with(1.8, 45.0, SchemaVersion::V1))
            .expect("Should predict");
        let heavy = model
            .predict(&vector_with(1.6, 130.0, SchemaVersion::V1))
            .expect("Should predict");
        assert!(heavy.risk > light.risk);
        assert!(heavy.confidence > 0.0 && heavy.confidence <= 1.0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = LinearRiskModel::from_exported(exported_model(SchemaVersion::V2))
            .expect("Should build");
        let proba = model
            .predict_proba(&vector_with(1.7, 70.0, SchemaVersion::V2))
            .expect("Should predict");
        let total: f64 = proba.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(proba.len(), 7);
    }

    #[test]
    fn test_rejects_other_schema_vector() {
        let model = LinearRiskModel::from_exported(exported_model(SchemaVersion::V1))
            .expect("Should build");
        let err = model
            .predict(&vector_with(1.7, 70.0, SchemaVersion::V2))
            .expect_err("Should reject");
        assert!(matches!(
            err,
            ModelError::Schema(SchemaMismatchError::Version { .. })
        ));
    }

    #[test]
    fn test_rejects_reordered_columns() {
        let mut exported = exported_model(SchemaVersion::V1);
        exported.feature_names.swap(6, 13); // CAEC <-> CALC
        let err = LinearRiskModel::from_exported(exported).expect_err("Should reject");
        assert!(matches!(
            err,
            ModelError::Schema(SchemaMismatchError::ColumnName { index: 6, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let mut exported = exported_model(SchemaVersion::V1);
        exported.coefficients[3].pop();
        assert!(matches!(
            LinearRiskModel::from_exported(exported),
            Err(ModelError::Invalid(_))
        ));

        let mut exported = exported_model(SchemaVersion::V1);
        exported.scaler_scale[0] = 0.0;
        assert!(matches!(
            LinearRiskModel::from_exported(exported),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_class() {
        let mut exported = exported_model(SchemaVersion::V1);
        exported.classes[0] = "Underweight".into();
        assert!(matches!(
            LinearRiskModel::from_exported(exported),
            Err(ModelError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_load_with_digest_pin() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("obesity_model.json");
        let json = serde_json::to_vec(&exported_model(SchemaVersion::V1)).expect("serialize");
        std::fs::write(&path, &json).expect("write model");

        let digest = sha256_hex(&json);
        let model = LinearRiskModel::load(&path, Some(&digest)).expect("Should load");
        assert_eq!(model.schema_version(), SchemaVersion::V1);

        let err = LinearRiskModel::load(&path, Some(&"0".repeat(64))).expect_err("Should reject");
        assert!(matches!(err, ModelError::DigestMismatch { .. }));

        assert!(LinearRiskModel::load(&path, None).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = LinearRiskModel::load(&temp.path().join("missing.json"), None)
            .expect_err("Should fail");
        assert!(matches!(err, ModelError::Load(_)));
    }

    #[test]
    fn test_softmax_is_stable() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);
    }
}
