//! Domain layer: Core types and pure logic.
//!
//! Nothing here performs I/O. Unit conversion, BMI banding and feature
//! encoding are deterministic functions of their inputs.

pub mod bmi;
pub mod encoder;
mod error;
pub mod profile;
mod risk;
pub mod schema;
pub mod units;

pub use bmi::{bmi, classify, compute_bmi, format_message, severity_of, BmiCategory, BmiResult, Severity};
pub use encoder::{decode, encode, encode_answers, DecodedFeatures, EncodedFeatureVector};
pub use error::{DomainError, EncodingError, SchemaMismatchError};
pub use profile::{
    Frequency, Gender, LifestyleProfile, ProfileError, QuestionnaireAnswers, ScreenTime, Transport,
};
pub use risk::{ObesityRisk, RiskPrediction, Submission};
pub use schema::{column_names, SchemaVersion, FEATURE_COUNT, FEATURE_NAMES};
pub use units::{feet_inches_to_meters, Height};
