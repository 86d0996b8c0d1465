//! # BodyScope
//!
//! Lifestyle-questionnaire health-risk advisory pipeline.
//!
//! This crate provides:
//! - Imperial/metric height normalization and BMI banding
//! - Versioned encoding of questionnaire answers into classifier features
//! - Obesity-risk classification through a pre-trained model
//! - Advice prompt construction and local submission history
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (profile, BMI, feature schema, risk)
//! - `ports`: Trait definitions for the classifier, advice backend and store
//! - `adapters`: Concrete implementations (JSON linear model, SQLite, log sanitizer)
//! - `application`: The advisory pipeline orchestrating domain and ports
//! - `config`: Environment-driven settings for the binaries

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{AdvisoryService, Assessment};
pub use config::AppConfig;
pub use domain::{BmiResult, LifestyleProfile, ObesityRisk, QuestionnaireAnswers};

/// Result type for BodyScope operations
pub type Result<T> = std::result::Result<T, BodyscopeError>;

/// Main error type for BodyScope
#[derive(Debug, thiserror::Error)]
pub enum BodyscopeError {
    #[error("Invalid measurement: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Invalid answer: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(#[from] domain::SchemaMismatchError),

    #[error("Classifier failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Advice generation failed: {0}")]
    Advice(#[from] ports::AdviceError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<domain::ProfileError> for BodyscopeError {
    fn from(err: domain::ProfileError) -> Self {
        match err {
            domain::ProfileError::Encoding(e) => Self::Encoding(e),
            domain::ProfileError::Domain(e) => Self::Domain(e),
        }
    }
}
