//! Advisory service: Orchestrates one questionnaire submission.
//!
//! This service coordinates:
//! - Answer validation and BMI computation
//! - Feature encoding under the classifier's schema
//! - Risk classification
//! - Advice generation
//! - Storage persistence

use std::sync::Arc;

use serde::Serialize;

use super::prompt::build_advice_prompt;
use crate::adapters::StorageError;
use crate::domain::{
    bmi, encode, BmiResult, EncodedFeatureVector, LifestyleProfile, QuestionnaireAnswers,
    RiskPrediction, SchemaVersion, Submission,
};
use crate::ports::{AdviceGenerator, RiskClassifier, SubmissionStore};
use crate::BodyscopeError;

/// Everything produced for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub profile: LifestyleProfile,
    pub features: EncodedFeatureVector,
    pub bmi: BmiResult,
    pub prediction: RiskPrediction,
    /// Prompt handed (or to be handed) to the advice backend
    pub prompt: String,
    pub advice: Option<String>,
    /// Set when the submission was persisted
    pub submission_id: Option<String>,
}

/// Service running the questionnaire pipeline.
///
/// The encoder schema is taken from the classifier and checked once at
/// construction; every vector this service builds is encoded under it.
pub struct AdvisoryService<C, S>
where
    C: RiskClassifier,
    S: SubmissionStore,
{
    classifier: Arc<C>,
    storage: Arc<S>,
    advisor: Option<Arc<dyn AdviceGenerator>>,
    schema: SchemaVersion,
    persist: bool,
}

impl<C, S> AdvisoryService<C, S>
where
    C: RiskClassifier,
    S: SubmissionStore,
    S::Error: Into<StorageError>,
{
    /// Create a new advisory service.
    ///
    /// # Errors
    /// Returns `BodyscopeError::SchemaMismatch` if the classifier's declared
    /// columns disagree with its schema version.
    pub fn new(classifier: Arc<C>, storage: Arc<S>) -> Result<Self, BodyscopeError> {
        let schema = classifier.schema_version();
        Self::with_schema(classifier, storage, schema)
    }

    /// Create a service that encodes under `schema`.
    ///
    /// # Errors
    /// Returns `BodyscopeError::SchemaMismatch` if the classifier was not
    /// trained on `schema`.
    pub fn with_schema(
        classifier: Arc<C>,
        storage: Arc<S>,
        schema: SchemaVersion,
    ) -> Result<Self, BodyscopeError> {
        classifier.check_schema(schema)?;
        tracing::debug!("Advisory service using schema {}", schema);

        Ok(Self {
            classifier,
            storage,
            advisor: None,
            schema,
            persist: true,
        })
    }

    /// Attach an advice backend.
    #[must_use]
    pub fn with_advisor(mut self, advisor: Arc<dyn AdviceGenerator>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Enable or disable persistence of submissions.
    #[must_use]
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Run the full pipeline on raw answers.
    ///
    /// Validation, BMI and encoding failures abort before classification.
    /// Advice and storage failures are logged and leave the prediction intact.
    ///
    /// # Errors
    /// Returns error if the answers are invalid or the classifier fails.
    pub fn assess(&self, answers: &QuestionnaireAnswers) -> Result<Assessment, BodyscopeError> {
        tracing::info!("Starting assessment...");

        let profile = LifestyleProfile::try_from(answers)?;
        let bmi = bmi(profile.weight_kg, profile.height_m())?;
        tracing::debug!("BMI {} ({})", bmi.value, bmi.category);

        let features = encode(&profile, self.schema)?;
        let prediction = self.classifier.predict(&features)?;

        let prompt = build_advice_prompt(&profile, &bmi);
        let advice = self.advise(&prompt);

        let submission_id = if self.persist {
            let submission = Submission::new(profile.clone(), bmi.clone(), prediction, advice.clone());
            match self.storage.save_submission(&submission) {
                Ok(()) => Some(submission.id),
                Err(e) => {
                    tracing::warn!("Failed to save submission: {:?}", e);
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            "Assessment complete: bmi={:.2} ({}), risk={}, confidence={:.2}%",
            bmi.value,
            bmi.category,
            prediction.risk,
            prediction.confidence * 100.0
        );

        Ok(Assessment {
            profile,
            features,
            bmi,
            prediction,
            prompt,
            advice,
            submission_id,
        })
    }

    fn advise(&self, prompt: &str) -> Option<String> {
        let advisor = self.advisor.as_ref()?;
        match advisor.generate(prompt) {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("Advice backend {} returned no text", advisor.name());
                None
            }
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Advice backend {} failed: {}", advisor.name(), e);
                None
            }
        }
    }

    /// Get recent submissions from storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent_submissions(&self, limit: usize) -> Result<Vec<Submission>, BodyscopeError> {
        self.storage
            .load_recent_submissions(limit)
            .map_err(|e| BodyscopeError::Storage(e.into()))
    }

    /// Get total submission count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn submission_count(&self) -> Result<usize, BodyscopeError> {
        self.storage
            .count_submissions()
            .map_err(|e| BodyscopeError::Storage(e.into()))
    }
}
