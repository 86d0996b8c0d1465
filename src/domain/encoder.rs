//! Profile to feature-vector encoding.

use serde::{Deserialize, Serialize};

use super::error::{EncodingError, SchemaMismatchError};
use super::profile::{
    Frequency, Gender, LifestyleProfile, ProfileError, QuestionnaireAnswers, ScreenTime, Transport,
};
use super::schema::{
    column, decode_category, flag_code, frequency_code, screen_time_code, transport_code,
    SchemaVersion, FEATURE_COUNT, FEATURE_NAMES,
};

/// Classifier input, tagged with the schema it was produced under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    schema: SchemaVersion,
    values: [f64; FEATURE_COUNT],
}

impl EncodedFeatureVector {
    /// Wrap raw values produced elsewhere (e.g. a replayed submission).
    #[must_use]
    pub fn from_values(schema: SchemaVersion, values: [f64; FEATURE_COUNT]) -> Self {
        Self { schema, values }
    }

    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Values as an owned vector for inference.
    /// Order matches `FEATURE_NAMES`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Value of a named column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// `(name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Require that this vector was built for `expected`.
    ///
    /// # Errors
    /// Returns `SchemaMismatchError::Version` on a different version.
    pub fn ensure_schema(&self, expected: SchemaVersion) -> Result<(), SchemaMismatchError> {
        if self.schema == expected {
            Ok(())
        } else {
            Err(SchemaMismatchError::Version {
                encoder: self.schema,
                classifier: expected,
            })
        }
    }
}

/// Encode a profile under `schema`.
///
/// The profile is checked first, so a hand-built or deserialized profile
/// with bad measurements or out-of-range sliders never reaches a classifier.
/// Pure: the same profile and schema always give bit-identical output.
///
/// # Errors
/// Returns `ProfileError::Domain` for invalid measurements,
/// `EncodingError::OutOfRange` for slider values outside their table, and
/// `EncodingError::UnsupportedCategory` when the schema has no code for a
/// value (gender Other under v1).
pub fn encode(
    profile: &LifestyleProfile,
    schema: SchemaVersion,
) -> Result<EncodedFeatureVector, ProfileError> {
    profile.check()?;

    let mut values = [0.0; FEATURE_COUNT];

    values[column::GENDER] = schema.gender_code(profile.gender)?;
    values[column::AGE] = f64::from(profile.age);
    values[column::HEIGHT] = profile.height_m();
    values[column::WEIGHT] = profile.weight_kg;
    values[column::FCVC] = f64::from(profile.vegetable_intake);
    values[column::NCP] = f64::from(profile.meals_per_day);
    values[column::CAEC] = frequency_code(profile.snacking);
    values[column::SMOKE] = flag_code(profile.smoking);
    values[column::CH2O] = schema.water_code(profile.water_intake);
    values[column::SCC] = flag_code(profile.calorie_monitoring);
    values[column::FAF] = f64::from(profile.physical_activity);
    values[column::TUE] = screen_time_code(profile.screen_time);
    values[column::MTRANS] = transport_code(profile.transport);
    values[column::CALC] = frequency_code(profile.alcohol);
    values[column::FAMILY_HISTORY] = flag_code(profile.family_history);
    values[column::FAVC] = flag_code(profile.fried_food);

    Ok(EncodedFeatureVector { schema, values })
}

/// Parse raw answers and encode them in one step.
///
/// # Errors
/// Returns `ProfileError` for unknown, missing or out-of-range answers and for
/// invalid measurements.
pub fn encode_answers(
    answers: &QuestionnaireAnswers,
    schema: SchemaVersion,
) -> Result<EncodedFeatureVector, ProfileError> {
    let profile = LifestyleProfile::try_from(answers)?;
    encode(&profile, schema)
}

/// Categorical labels and numeric values recovered from a vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedFeatures {
    pub gender: Gender,
    pub age: f64,
    pub height_m: f64,
    pub weight_kg: f64,
    pub vegetable_intake: f64,
    pub meals_per_day: f64,
    pub snacking: Frequency,
    pub smoking: bool,
    pub water_intake: f64,
    pub calorie_monitoring: bool,
    pub physical_activity: f64,
    pub screen_time: ScreenTime,
    pub transport: Transport,
    pub alcohol: Frequency,
    pub family_history: bool,
    pub fried_food: bool,
}

fn decode_flag(code: f64, schema: SchemaVersion, attribute: &'static str) -> Result<bool, EncodingError> {
    if code == 1.0 {
        Ok(true)
    } else if code == 0.0 {
        Ok(false)
    } else {
        Err(EncodingError::InvalidCode {
            attribute,
            code: code.to_string(),
            schema,
        })
    }
}

/// Reverse `encode` through the same tables.
///
/// # Errors
/// Returns `EncodingError::InvalidCode` for a code no table produces.
pub fn decode(vector: &EncodedFeatureVector) -> Result<DecodedFeatures, EncodingError> {
    let schema = vector.schema;
    let v = &vector.values;

    Ok(DecodedFeatures {
        gender: decode_category(v[column::GENDER], schema, "Gender", |g| schema.gender_code(g))?,
        age: v[column::AGE],
        height_m: v[column::HEIGHT],
        weight_kg: v[column::WEIGHT],
        vegetable_intake: v[column::FCVC],
        meals_per_day: v[column::NCP],
        snacking: decode_category(v[column::CAEC], schema, "CAEC", |f| Ok(frequency_code(f)))?,
        smoking: decode_flag(v[column::SMOKE], schema, "SMOKE")?,
        water_intake: schema.water_level(v[column::CH2O]),
        calorie_monitoring: decode_flag(v[column::SCC], schema, "SCC")?,
        physical_activity: v[column::FAF],
        screen_time: decode_category(v[column::TUE], schema, "TUE", |s| Ok(screen_time_code(s)))?,
        transport: decode_category(v[column::MTRANS], schema, "MTRANS", |t| Ok(transport_code(t)))?,
        alcohol: decode_category(v[column::CALC], schema, "CALC", |f| Ok(frequency_code(f)))?,
        family_history: decode_flag(v[column::FAMILY_HISTORY], schema, "family_history_with_overweight")?,
        fried_food: decode_flag(v[column::FAVC], schema, "FAVC")?,
    })
}
