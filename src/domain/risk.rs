//! Obesity-risk prediction and submission records.

use serde::{Deserialize, Serialize};

use super::bmi::BmiResult;
use super::profile::LifestyleProfile;

/// Obesity level predicted by the classifier.
///
/// Variants follow the class labels of the obesity-levels survey dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObesityRisk {
    InsufficientWeight,
    NormalWeight,
    OverweightLevelI,
    OverweightLevelII,
    ObesityTypeI,
    ObesityTypeII,
    ObesityTypeIII,
}

impl ObesityRisk {
    pub const ALL: [Self; 7] = [
        Self::InsufficientWeight,
        Self::NormalWeight,
        Self::OverweightLevelI,
        Self::OverweightLevelII,
        Self::ObesityTypeI,
        Self::ObesityTypeII,
        Self::ObesityTypeIII,
    ];

    /// Class label as emitted by the trained model.
    #[must_use]
    pub fn class_label(&self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient_Weight",
            Self::NormalWeight => "Normal_Weight",
            Self::OverweightLevelI => "Overweight_Level_I",
            Self::OverweightLevelII => "Overweight_Level_II",
            Self::ObesityTypeI => "Obesity_Type_I",
            Self::ObesityTypeII => "Obesity_Type_II",
            Self::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Parse a model class label.
    #[must_use]
    pub fn from_class_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.class_label() == label.trim())
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient weight",
            Self::NormalWeight => "Normal weight",
            Self::OverweightLevelI => "Overweight (level I)",
            Self::OverweightLevelII => "Overweight (level II)",
            Self::ObesityTypeI => "Obesity (type I)",
            Self::ObesityTypeII => "Obesity (type II)",
            Self::ObesityTypeIII => "Obesity (type III)",
        }
    }
}

impl std::fmt::Display for ObesityRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_label())
    }
}

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Predicted class
    pub risk: ObesityRisk,

    /// Probability assigned to `risk` (0.0 to 1.0)
    pub confidence: f64,
}

/// One completed submission, as handed to persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier
    pub id: String,

    /// The validated answers
    pub profile: LifestyleProfile,

    /// BMI figure and band
    pub bmi: BmiResult,

    /// Classifier output
    pub prediction: RiskPrediction,

    /// Generated advice, if an advisor was available and succeeded
    pub advice: Option<String>,

    /// Timestamp of the submission
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// Create a new submission record.
    #[must_use]
    pub fn new(
        profile: LifestyleProfile,
        bmi: BmiResult,
        prediction: RiskPrediction,
        advice: Option<String>,
    ) -> Self {
        Self {
            id: uuid_v4(),
            profile,
            bmi,
            prediction,
            advice,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a random UUID v4 using a CSPRNG seeded from OS entropy.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
