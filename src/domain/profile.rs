//! Lifestyle questionnaire types.
//!
//! `QuestionnaireAnswers` is what the form hands us: loosely typed selections
//! such as `"Sometimes"`, `"yes"` or `"Low Usage"`. `LifestyleProfile` is the
//! validated, closed-enumeration record everything else consumes.
//!
//! Feature codes follow the obesity-levels survey columns
//! (FAVC, FCVC, NCP, CAEC, SMOKE, CH2O, SCC, FAF, TUE, CALC, MTRANS).

use serde::{Deserialize, Serialize};

use super::error::{DomainError, EncodingError};
use super::units::{Height, INCHES_PER_FOOT};

/// A closed set of questionnaire options with a canonical label.
pub trait Category: Sized + Copy + PartialEq + 'static {
    /// Questionnaire attribute name, used in error messages.
    const ATTRIBUTE: &'static str;

    /// Every variant, in table order.
    fn all() -> &'static [Self];

    /// Canonical label.
    fn label(&self) -> &'static str;

    /// Additional spellings accepted when parsing.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Parse a selection against a category table.
///
/// Matching is case-insensitive on the trimmed input. Values that match
/// neither a label nor an alias are rejected, never defaulted.
///
/// # Errors
/// Returns `EncodingError::UnknownCategory` for unrecognized input.
pub fn parse_category<C: Category>(raw: &str) -> Result<C, EncodingError> {
    let needle = raw.trim();
    C::all()
        .iter()
        .copied()
        .find(|c| {
            c.label().eq_ignore_ascii_case(needle)
                || c.aliases().iter().any(|a| a.eq_ignore_ascii_case(needle))
        })
        .ok_or_else(|| EncodingError::UnknownCategory {
            attribute: C::ATTRIBUTE,
            value: raw.to_string(),
        })
}

/// Parse a yes/no selection.
///
/// # Errors
/// Returns `EncodingError::UnknownCategory` for anything but yes/no/true/false.
pub fn parse_flag(attribute: &'static str, raw: &str) -> Result<bool, EncodingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(EncodingError::UnknownCategory {
            attribute,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Category for Gender {
    const ATTRIBUTE: &'static str = "gender";

    fn all() -> &'static [Self] {
        &[Self::Male, Self::Female, Self::Other]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Four-point frequency scale (snacking, alcohol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Never,
    Sometimes,
    Frequently,
    Always,
}

impl Category for Frequency {
    const ATTRIBUTE: &'static str = "frequency";

    fn all() -> &'static [Self] {
        &[Self::Never, Self::Sometimes, Self::Frequently, Self::Always]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Sometimes => "Sometimes",
            Self::Frequently => "Frequently",
            Self::Always => "Always",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            // Older forms offered "no" and "Nope" in place of "Never".
            Self::Never => &["No", "Nope"],
            _ => &[],
        }
    }
}

/// Daily technology / screen time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenTime {
    Low,
    Moderate,
    High,
}

impl Category for ScreenTime {
    const ATTRIBUTE: &'static str = "screen_time";

    fn all() -> &'static [Self] {
        &[Self::Low, Self::Moderate, Self::High]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Usage",
            Self::Moderate => "Moderate Usage",
            Self::High => "High Usage",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &["Low"],
            Self::Moderate => &["Moderate"],
            Self::High => &["High"],
        }
    }
}

/// Usual mode of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Automobile,
    Bike,
    Motorbike,
    PublicTransportation,
    Walking,
}

impl Category for Transport {
    const ATTRIBUTE: &'static str = "transport";

    fn all() -> &'static [Self] {
        &[
            Self::Automobile,
            Self::Bike,
            Self::Motorbike,
            Self::PublicTransportation,
            Self::Walking,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Automobile => "Automobile",
            Self::Bike => "Bike",
            Self::Motorbike => "Motorbike",
            Self::PublicTransportation => "Public Transportation",
            Self::Walking => "Walking",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Automobile => &["Car"],
            Self::PublicTransportation => &["Public_Transportation"],
            _ => &[],
        }
    }
}

/// Raw questionnaire submission as produced by the input form.
///
/// Every field is optional so that an absent answer is reported as
/// `EncodingError::MissingField` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireAnswers {
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub height: Option<Height>,
    pub weight_kg: Option<f64>,
    /// FCVC, 1-3
    pub vegetable_intake: Option<i64>,
    /// NCP, 1-4
    pub meals_per_day: Option<i64>,
    /// CAEC
    pub snacking: Option<String>,
    /// SMOKE
    pub smoking: Option<String>,
    /// CH2O, 1-3 (liters/day)
    pub water_intake: Option<i64>,
    /// SCC
    pub calorie_monitoring: Option<String>,
    /// FAF, 0-3
    pub physical_activity: Option<i64>,
    /// TUE
    pub screen_time: Option<String>,
    /// MTRANS
    pub transport: Option<String>,
    /// CALC
    pub alcohol: Option<String>,
    /// family_history_with_overweight
    pub family_history: Option<String>,
    /// FAVC
    pub fried_food: Option<String>,
}

/// Validated lifestyle record for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleProfile {
    pub gender: Gender,
    /// Age in years (> 0)
    pub age: u32,
    pub height: Height,
    /// Weight in kilograms (> 0)
    pub weight_kg: f64,
    /// Vegetable servings rating, 1-3
    pub vegetable_intake: u8,
    /// Main meals per day, 1-4
    pub meals_per_day: u8,
    pub snacking: Frequency,
    pub smoking: bool,
    /// Water intake level, 1-3
    pub water_intake: u8,
    pub calorie_monitoring: bool,
    /// Physical activity level, 0-3
    pub physical_activity: u8,
    pub screen_time: ScreenTime,
    pub transport: Transport,
    pub alcohol: Frequency,
    pub family_history: bool,
    /// Frequent high-calorie / fried food
    pub fried_food: bool,
}

impl LifestyleProfile {
    /// Height in meters.
    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.height.meters()
    }

    /// Check measurements (age, height, weight).
    ///
    /// # Errors
    /// Returns the first `DomainError` found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.age == 0 {
            return Err(DomainError::InvalidAge(0));
        }
        if let Height::Imperial { inches, .. } = self.height {
            if inches >= INCHES_PER_FOOT {
                return Err(DomainError::InchesOutOfRange(inches));
            }
        }
        let height_m = self.height_m();
        if !height_m.is_finite() || height_m <= 0.0 {
            return Err(DomainError::InvalidHeight(height_m));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(DomainError::InvalidWeight(self.weight_kg));
        }
        Ok(())
    }

    /// Full check of a profile that did not come through `TryFrom`:
    /// measurements plus the ordinal slider ranges.
    ///
    /// # Errors
    /// Returns the first `DomainError` or `EncodingError::OutOfRange` found.
    pub fn check(&self) -> Result<(), ProfileError> {
        self.validate()?;
        ordinal(i64::from(self.vegetable_intake), "vegetable_intake", VEGETABLE_RANGE)?;
        ordinal(i64::from(self.meals_per_day), "meals_per_day", MEALS_RANGE)?;
        ordinal(i64::from(self.water_intake), "water_intake", WATER_RANGE)?;
        ordinal(i64::from(self.physical_activity), "physical_activity", ACTIVITY_RANGE)?;
        Ok(())
    }
}

/// Inclusive answer ranges of the ordinal sliders.
pub const VEGETABLE_RANGE: (i64, i64) = (1, 3);
pub const MEALS_RANGE: (i64, i64) = (1, 4);
pub const WATER_RANGE: (i64, i64) = (1, 3);
pub const ACTIVITY_RANGE: (i64, i64) = (0, 3);

fn required<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T, EncodingError> {
    value.clone().ok_or(EncodingError::MissingField(field))
}

fn ordinal(value: i64, attribute: &'static str, range: (i64, i64)) -> Result<u8, EncodingError> {
    let (min, max) = range;
    if (min..=max).contains(&value) {
        // min/max are small table bounds, the cast cannot truncate.
        Ok(value as u8)
    } else {
        Err(EncodingError::OutOfRange {
            attribute,
            value,
            min,
            max,
        })
    }
}

/// Error while turning answers into a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TryFrom<&QuestionnaireAnswers> for LifestyleProfile {
    type Error = ProfileError;

    fn try_from(answers: &QuestionnaireAnswers) -> Result<Self, Self::Error> {
        let age = required(&answers.age, "age")?;
        if age <= 0 {
            return Err(DomainError::InvalidAge(age).into());
        }
        let age = u32::try_from(age).map_err(|_| DomainError::InvalidAge(age))?;

        let profile = Self {
            gender: parse_category(&required(&answers.gender, "gender")?)?,
            age,
            height: required(&answers.height, "height")?,
            weight_kg: required(&answers.weight_kg, "weight_kg")?,
            vegetable_intake: ordinal(
                required(&answers.vegetable_intake, "vegetable_intake")?,
                "vegetable_intake",
                VEGETABLE_RANGE,
            )?,
            meals_per_day: ordinal(
                required(&answers.meals_per_day, "meals_per_day")?,
                "meals_per_day",
                MEALS_RANGE,
            )?,
            snacking: parse_category(&required(&answers.snacking, "snacking")?).map_err(
                |e| rename_attribute(e, "snacking"),
            )?,
            smoking: parse_flag("smoking", &required(&answers.smoking, "smoking")?)?,
            water_intake: ordinal(
                required(&answers.water_intake, "water_intake")?,
                "water_intake",
                WATER_RANGE,
            )?,
            calorie_monitoring: parse_flag(
                "calorie_monitoring",
                &required(&answers.calorie_monitoring, "calorie_monitoring")?,
            )?,
            physical_activity: ordinal(
                required(&answers.physical_activity, "physical_activity")?,
                "physical_activity",
                ACTIVITY_RANGE,
            )?,
            screen_time: parse_category(&required(&answers.screen_time, "screen_time")?)?,
            transport: parse_category(&required(&answers.transport, "transport")?)?,
            alcohol: parse_category(&required(&answers.alcohol, "alcohol")?)
                .map_err(|e| rename_attribute(e, "alcohol"))?,
            family_history: parse_flag(
                "family_history",
                &required(&answers.family_history, "family_history")?,
            )?,
            fried_food: parse_flag("fried_food", &required(&answers.fried_food, "fried_food")?)?,
        };

        profile.validate()?;
        Ok(profile)
    }
}

/// Frequency is shared by two questions; report the one that failed.
fn rename_attribute(err: EncodingError, attribute: &'static str) -> EncodingError {
    match err {
        EncodingError::UnknownCategory { value, .. } => {
            EncodingError::UnknownCategory { attribute, value }
        }
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            gender: Some("Male".into()),
            age: Some(25),
            height: Some(Height::Imperial { feet: 5, inches: 7 }),
            weight_kg: Some(70.0),
            vegetable_intake: Some(2),
            meals_per_day: Some(3),
            snacking: Some("Sometimes".into()),
            smoking: Some("No".into()),
            water_intake: Some(2),
            calorie_monitoring: Some("no".into()),
            physical_activity: Some(1),
            screen_time: Some("Moderate Usage".into()),
            transport: Some("Public Transportation".into()),
            alcohol: Some("no".into()),
            family_history: Some("yes".into()),
            fried_food: Some("yes".into()),
        }
    }

    #[test]
    fn test_profile_from_answers() {
        let profile = LifestyleProfile::try_from(&sample_answers()).expect("Should parse");
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.alcohol, Frequency::Never);
        assert_eq!(profile.snacking, Frequency::Sometimes);
        assert_eq!(profile.screen_time, ScreenTime::Moderate);
        assert_eq!(profile.transport, Transport::PublicTransportation);
        assert!(!profile.smoking);
        assert!(profile.family_history);
        assert!((profile.height_m() - 1.70).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_category::<Frequency>(" always "), Ok(Frequency::Always));
        assert_eq!(parse_category::<Frequency>("NOPE"), Ok(Frequency::Never));
        assert_eq!(
            parse_category::<Transport>("public_transportation"),
            Ok(Transport::PublicTransportation)
        );
        assert_eq!(parse_flag("smoking", "Yes"), Ok(true));
    }

    #[test]
    fn test_unknown_alcohol_value() {
        let mut answers = sample_answers();
        answers.alcohol = Some("Maybe".into());
        let err = LifestyleProfile::try_from(&answers).expect_err("Should reject");
        assert_eq!(
            err,
            ProfileError::Encoding(EncodingError::UnknownCategory {
                attribute: "alcohol",
                value: "Maybe".into(),
            })
        );
    }

    #[test]
    fn test_missing_field() {
        let mut answers = sample_answers();
        answers.transport = None;
        let err = LifestyleProfile::try_from(&answers).expect_err("Should reject");
        assert_eq!(err, ProfileError::Encoding(EncodingError::MissingField("transport")));
    }

    #[test]
    fn test_out_of_range_ordinal() {
        let mut answers = sample_answers();
        answers.meals_per_day = Some(7);
        assert!(matches!(
            LifestyleProfile::try_from(&answers),
            Err(ProfileError::Encoding(EncodingError::OutOfRange { attribute: "meals_per_day", .. }))
        ));
    }

    #[test]
    fn test_invalid_age_and_inches() {
        let mut answers = sample_answers();
        answers.age = Some(0);
        assert_eq!(
            LifestyleProfile::try_from(&answers),
            Err(ProfileError::Domain(DomainError::InvalidAge(0)))
        );

        let mut answers = sample_answers();
        answers.height = Some(Height::Imperial { feet: 5, inches: 12 });
        assert_eq!(
            LifestyleProfile::try_from(&answers),
            Err(ProfileError::Domain(DomainError::InchesOutOfRange(12)))
        );

        let mut answers = sample_answers();
        answers.height = Some(Height::Meters(0.0));
        assert!(matches!(
            LifestyleProfile::try_from(&answers),
            Err(ProfileError::Domain(DomainError::InvalidHeight(_)))
        ));
    }

    #[test]
    fn test_check_catches_hand_built_profile() {
        let valid = LifestyleProfile::try_from(&sample_answers()).expect("Should parse");
        assert_eq!(valid.check(), Ok(()));

        let mut profile = valid.clone();
        profile.water_intake = 0;
        assert_eq!(
            profile.check(),
            Err(ProfileError::Encoding(EncodingError::OutOfRange {
                attribute: "water_intake",
                value: 0,
                min: 1,
                max: 3,
            }))
        );

        let mut profile = valid.clone();
        profile.physical_activity = 200;
        assert!(matches!(
            profile.check(),
            Err(ProfileError::Encoding(EncodingError::OutOfRange { attribute: "physical_activity", .. }))
        ));

        let mut profile = valid;
        profile.weight_kg = -5.0;
        assert_eq!(profile.check(), Err(ProfileError::Domain(DomainError::InvalidWeight(-5.0))));
    }

    #[test]
    fn test_answers_from_json() {
        let json = r#"{
            "gender": "Female",
            "age": 31,
            "height": {"meters": 1.62},
            "weight_kg": 58.5,
            "vegetable_intake": 3,
            "meals_per_day": 3,
            "snacking": "Frequently",
            "smoking": "no",
            "water_intake": 3,
            "calorie_monitoring": "yes",
            "physical_activity": 2,
            "screen_time": "Low Usage",
            "transport": "Walking",
            "alcohol": "Sometimes",
            "family_history": "no",
            "fried_food": "no"
        }"#;
        let answers: QuestionnaireAnswers = serde_json::from_str(json).expect("Should deserialize");
        let profile = LifestyleProfile::try_from(&answers).expect("Should parse");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.height, Height::Meters(1.62));
        assert!(profile.calorie_monitoring);
    }
}
