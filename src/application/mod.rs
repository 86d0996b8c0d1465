//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the questionnaire-to-advice pipeline.

mod advisory;
pub mod prompt;

pub use advisory::{AdvisoryService, Assessment};
pub use prompt::{build_advice_prompt, DISCLAIMER, LANGUAGE_INSTRUCTION};
