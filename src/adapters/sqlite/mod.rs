//! SQLite adapter: Implementation of SubmissionStore.
//!
//! Provides local persistence for completed submissions. The validated
//! profile is stored verbatim as JSON next to flat BMI and risk columns so
//! the table stays queryable without decoding.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex is reported
//! as `StorageError::LockPoisoned`.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{BmiCategory, BmiResult, ObesityRisk, RiskPrediction, Submission};
use crate::ports::SubmissionStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt row {id}: {reason}")]
    CorruptRow { id: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

const SELECT_COLUMNS: &str = r"
    SELECT id, profile_json, bmi, bmi_category, risk, confidence, advice, created_at
    FROM submissions
";

/// SQLite storage adapter.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                profile_json TEXT NOT NULL,
                bmi REAL NOT NULL,
                bmi_category TEXT NOT NULL,
                risk TEXT NOT NULL,
                confidence REAL NOT NULL,
                advice TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_submissions_created
                ON submissions(created_at DESC);
            ",
        )?;

        Ok(())
    }

    /// Raw column values of one row.
    fn read_row(row: &Row<'_>) -> rusqlite::Result<RawSubmission> {
        Ok(RawSubmission {
            id: row.get(0)?,
            profile_json: row.get(1)?,
            bmi: row.get(2)?,
            bmi_category: row.get(3)?,
            risk: row.get(4)?,
            confidence: row.get(5)?,
            advice: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

struct RawSubmission {
    id: String,
    profile_json: String,
    bmi: f64,
    bmi_category: String,
    risk: String,
    confidence: f64,
    advice: Option<String>,
    created_at: String,
}

impl RawSubmission {
    fn into_submission(self) -> Result<Submission, StorageError> {
        let corrupt = |reason: String| StorageError::CorruptRow {
            id: self.id.clone(),
            reason,
        };

        let profile = serde_json::from_str(&self.profile_json)
            .map_err(|e| corrupt(format!("profile: {e}")))?;

        // Re-derive the BMI band from the stored value; the stored label
        // must agree with it.
        let bmi = BmiResult::from_value(self.bmi);
        if BmiCategory::from_label(&self.bmi_category) != Some(bmi.category) {
            return Err(corrupt(format!(
                "bmi_category {:?} does not match bmi {}",
                self.bmi_category, self.bmi
            )));
        }

        let risk = ObesityRisk::from_class_label(&self.risk)
            .ok_or_else(|| corrupt(format!("unknown risk {:?}", self.risk)))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| corrupt(format!("created_at: {e}")))?;

        Ok(Submission {
            id: self.id.clone(),
            profile,
            bmi,
            prediction: RiskPrediction {
                risk,
                confidence: self.confidence,
            },
            advice: self.advice,
            created_at,
        })
    }
}

impl SubmissionStore for SqliteStore {
    type Error = StorageError;

    fn save_submission(&self, submission: &Submission) -> Result<(), Self::Error> {
        let profile_json = serde_json::to_string(&submission.profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let conn = self.lock()?;

        conn.execute(
            r"
            INSERT INTO submissions (
                id, profile_json, bmi, bmi_category, risk, confidence, advice, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                submission.id,
                profile_json,
                submission.bmi.value,
                submission.bmi.category.label(),
                submission.prediction.risk.class_label(),
                submission.prediction.confidence,
                submission.advice,
                submission.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Saved submission {} to storage", submission.id);
        Ok(())
    }

    fn load_submission(&self, id: &str) -> Result<Option<Submission>, Self::Error> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        stmt.query_row(params![id], Self::read_row)
            .optional()?
            .map(RawSubmission::into_submission)
            .transpose()
    }

    fn load_recent_submissions(&self, limit: usize) -> Result<Vec<Submission>, Self::Error> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1"))?;

        let rows = stmt
            .query_map(params![limit as i64], Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawSubmission::into_submission).collect()
    }

    fn count_submissions(&self) -> Result<usize, Self::Error> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn delete_submission(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM submissions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM submissions", [])?;
        tracing::warn!("Cleared all submissions from storage");
        Ok(())
    }
}
