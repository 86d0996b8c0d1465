//! Storage port: Trait for persisting submissions.
//!
//! This trait abstracts the storage backend (SQLite) from the application logic.

use crate::domain::Submission;

/// Trait for submission storage.
pub trait SubmissionStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a submission.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_submission(&self, submission: &Submission) -> Result<(), Self::Error>;

    /// Load a submission by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_submission(&self, id: &str) -> Result<Option<Submission>, Self::Error>;

    /// Load recent submissions, newest first (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent_submissions(&self, limit: usize) -> Result<Vec<Submission>, Self::Error>;

    /// Get the total count of submissions.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_submissions(&self) -> Result<usize, Self::Error>;

    /// Delete a submission by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete_submission(&self, id: &str) -> Result<(), Self::Error>;

    /// Delete all submissions.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
