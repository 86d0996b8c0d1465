//! Adapters layer: Concrete implementations of ports.
//!
//! - `model`: JSON-exported linear classifier
//! - `sqlite`: SQLite for submission storage
//! - `sanitize`: credential filtering for logs

pub mod model;
pub mod sanitize;
pub mod sqlite;

pub use model::{sha256_hex, ExportedLinearModel, LinearRiskModel};
pub use sqlite::{SqliteStore, StorageError};
