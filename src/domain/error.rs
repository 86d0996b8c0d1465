//! Domain error types.
//!
//! All three are local, synchronous failures. Any of them aborts the current
//! submission before the classifier is consulted.

use super::schema::SchemaVersion;

/// A measurement outside the domain where BMI or the profile is defined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Height must be a positive number of meters, got {0}")]
    InvalidHeight(f64),

    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("Age must be a positive number of years, got {0}")]
    InvalidAge(i64),

    #[error("Inches must be in 0..12, got {0}")]
    InchesOutOfRange(u32),

    #[error("BMI of {weight_kg} kg at {height_m} m is not a finite number")]
    BmiOverflow { weight_kg: f64, height_m: f64 },
}

/// A questionnaire value that cannot be mapped to a feature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown value {value:?} for {attribute}")]
    UnknownCategory {
        attribute: &'static str,
        value: String,
    },

    #[error("{attribute} value {value:?} is not supported by schema {schema}")]
    UnsupportedCategory {
        attribute: &'static str,
        value: String,
        schema: SchemaVersion,
    },

    #[error("{attribute} must be in {min}..={max}, got {value}")]
    OutOfRange {
        attribute: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Code {code} does not map to any {attribute} value under schema {schema}")]
    InvalidCode {
        attribute: &'static str,
        code: String,
        schema: SchemaVersion,
    },
}

/// Encoder output and classifier input disagree on the column contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaMismatchError {
    #[error("Schema version mismatch: encoder produces {encoder}, classifier expects {classifier}")]
    Version {
        encoder: SchemaVersion,
        classifier: SchemaVersion,
    },

    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("Feature {index} mismatch: expected {expected:?}, got {actual:?}")]
    ColumnName {
        index: usize,
        expected: String,
        actual: String,
    },
}
