//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the pipeline and the pieces it does not own: the trained
//! classifier, the advice backend and the submission store.

mod advisor;
mod classifier;
mod storage;

pub use advisor::{AdviceError, AdviceGenerator};
pub use classifier::{ModelError, RiskClassifier};
pub use storage::SubmissionStore;
