//! BMI computation and banding.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::units::round_to;

/// BMI band, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    /// bmi < 16
    SevereUnderweight,
    /// 16 <= bmi < 18.5
    Underweight,
    /// 18.5 <= bmi < 25
    Healthy,
    /// 25 <= bmi < 30
    Overweight,
    /// 30 <= bmi < 35
    Obese,
    /// bmi >= 35
    SevereObese,
}

impl BmiCategory {
    /// All bands in ascending order.
    pub const ALL: [Self; 6] = [
        Self::SevereUnderweight,
        Self::Underweight,
        Self::Healthy,
        Self::Overweight,
        Self::Obese,
        Self::SevereObese,
    ];

    /// Human-readable band name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SevereUnderweight => "Severe Underweight",
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
            Self::SevereObese => "Severe Obese",
        }
    }

    /// Parse a band from its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Lower bound of the band (inclusive), `None` for the first band.
    #[must_use]
    pub fn lower_bound(&self) -> Option<f64> {
        match self {
            Self::SevereUnderweight => None,
            Self::Underweight => Some(16.0),
            Self::Healthy => Some(18.5),
            Self::Overweight => Some(25.0),
            Self::Obese => Some(30.0),
            Self::SevereObese => Some(35.0),
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display emphasis for a BMI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Alert,
    Warning,
    Normal,
}

impl Severity {
    /// Accent color for display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Alert => (244, 63, 94),    // Rose (#F43F5E)
            Self::Warning => (251, 191, 36), // Amber (#FBBF24)
            Self::Normal => (16, 185, 129),  // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "ALERT"),
            Self::Warning => write!(f, "WARNING"),
            Self::Normal => write!(f, "NORMAL"),
        }
    }
}

/// Compute BMI (kg/m²) rounded to 2 decimals.
///
/// # Errors
/// Returns `DomainError` if height or weight is not a positive finite number,
/// or if the quotient is not finite (`DomainError::BmiOverflow`).
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Result<f64, DomainError> {
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(DomainError::InvalidHeight(height_m));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(DomainError::InvalidWeight(weight_kg));
    }

    // A tiny height can square to zero and a huge weight can overflow.
    let squared = height_m * height_m;
    let value = round_to(weight_kg / squared, 2);
    if squared == 0.0 || !value.is_finite() {
        return Err(DomainError::BmiOverflow {
            weight_kg,
            height_m,
        });
    }
    Ok(value)
}

/// Map a BMI value to its band.
///
/// Bands are half-open and cover the whole real line.
#[must_use]
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 16.0 {
        BmiCategory::SevereUnderweight
    } else if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Healthy
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::Obese
    } else {
        BmiCategory::SevereObese
    }
}

/// Display severity of a band.
#[must_use]
pub fn severity_of(category: BmiCategory) -> Severity {
    match category {
        BmiCategory::SevereUnderweight | BmiCategory::Obese | BmiCategory::SevereObese => {
            Severity::Alert
        }
        BmiCategory::Underweight | BmiCategory::Overweight => Severity::Warning,
        BmiCategory::Healthy => Severity::Normal,
    }
}

/// Render the user-facing BMI sentence.
#[must_use]
pub fn format_message(bmi: f64, category: BmiCategory) -> String {
    format!("Your BMI is {bmi:.2}, categorized as '{category}'.")
}

/// BMI figure with its band, severity and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to 2 decimals
    pub value: f64,

    /// Band the value falls in
    pub category: BmiCategory,

    /// Display emphasis
    pub severity: Severity,

    /// Formatted message
    pub message: String,
}

impl BmiResult {
    /// Build the full result from an already computed BMI value.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        let category = classify(value);
        Self {
            value,
            category,
            severity: severity_of(category),
            message: format_message(value, category),
        }
    }
}

/// Compute and classify BMI in one step.
///
/// # Errors
/// Returns `DomainError` if height or weight is not a positive finite number.
pub fn bmi(weight_kg: f64, height_m: f64) -> Result<BmiResult, DomainError> {
    compute_bmi(weight_kg, height_m).map(BmiResult::from_value)
}
