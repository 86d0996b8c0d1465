//! Classifier port: Trait for the pre-trained obesity-risk model.
//!
//! The model is an opaque, externally trained artifact. The only thing the
//! pipeline relies on is the column contract it declares.

use crate::domain::{EncodedFeatureVector, RiskPrediction, SchemaMismatchError, SchemaVersion};

/// Errors raised by a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Model digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error(transparent)]
    Schema(#[from] SchemaMismatchError),

    #[error("Unknown class label from model: {0}")]
    UnknownClass(String),
}

/// Trait for obesity-risk classification.
pub trait RiskClassifier: Send + Sync {
    /// Schema version the model was trained against.
    fn schema_version(&self) -> SchemaVersion;

    /// Column names the model expects, in order.
    fn feature_names(&self) -> Vec<String>;

    /// Predict the risk class for an encoded profile.
    ///
    /// # Errors
    /// Returns `ModelError::Schema` if the vector was encoded under a
    /// different schema version.
    fn predict(&self, features: &EncodedFeatureVector) -> Result<RiskPrediction, ModelError>;

    /// Verify that this classifier accepts vectors of `schema`.
    ///
    /// # Errors
    /// Returns the first version, count or name difference.
    fn check_schema(&self, schema: SchemaVersion) -> Result<(), SchemaMismatchError> {
        let declared = self.schema_version();
        if declared != schema {
            return Err(SchemaMismatchError::Version {
                encoder: schema,
                classifier: declared,
            });
        }
        schema.verify_columns(self.feature_names().as_slice())
    }
}
