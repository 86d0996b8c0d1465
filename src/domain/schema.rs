//! Feature schema: column order and category-to-code tables.
//!
//! A schema version pins the exact contract a classifier was trained on.
//! Column order is shared by every version; versions differ only in how
//! gender and water intake are coded.
//!
//! | Version | Gender                         | Water intake (CH2O) |
//! |---------|--------------------------------|---------------------|
//! | v1      | Female 0, Male 1 (no Other)    | 1-3 as entered      |
//! | v2      | Female 0, Male 1, Other 2      | 0-2 (entered - 1)   |
//!
//! Neither version is a default. The classifier artifact declares which one
//! it expects and the encoder follows it.

use serde::{Deserialize, Serialize};

use super::error::{EncodingError, SchemaMismatchError};
use super::profile::{Category, Frequency, Gender, ScreenTime, Transport};

/// Number of encoded features.
pub const FEATURE_COUNT: usize = 16;

/// Column order of the encoded vector (survey column names).
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Gender",
    "Age",
    "Height",
    "Weight",
    "FCVC",
    "NCP",
    "CAEC",
    "SMOKE",
    "CH2O",
    "SCC",
    "FAF",
    "TUE",
    "MTRANS",
    "CALC",
    "family_history_with_overweight",
    "FAVC",
];

/// Owned copy of `FEATURE_NAMES`.
#[must_use]
pub fn column_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
}

/// Index of each column in `FEATURE_NAMES`.
pub mod column {
    pub const GENDER: usize = 0;
    pub const AGE: usize = 1;
    pub const HEIGHT: usize = 2;
    pub const WEIGHT: usize = 3;
    pub const FCVC: usize = 4;
    pub const NCP: usize = 5;
    pub const CAEC: usize = 6;
    pub const SMOKE: usize = 7;
    pub const CH2O: usize = 8;
    pub const SCC: usize = 9;
    pub const FAF: usize = 10;
    pub const TUE: usize = 11;
    pub const MTRANS: usize = 12;
    pub const CALC: usize = 13;
    pub const FAMILY_HISTORY: usize = 14;
    pub const FAVC: usize = 15;
}

/// Encoding contract version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Column names for this version.
    #[must_use]
    pub fn feature_names(&self) -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    /// Check a classifier's declared columns against this version.
    ///
    /// # Errors
    /// Returns the first count or name difference.
    pub fn verify_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<(), SchemaMismatchError> {
        let expected = self.feature_names();
        if names.len() != expected.len() {
            return Err(SchemaMismatchError::ColumnCount {
                expected: expected.len(),
                actual: names.len(),
            });
        }
        for (index, (want, got)) in expected.iter().zip(names).enumerate() {
            if *want != got.as_ref() {
                return Err(SchemaMismatchError::ColumnName {
                    index,
                    expected: (*want).to_string(),
                    actual: got.as_ref().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Gender code.
    ///
    /// # Errors
    /// v1 has no code for `Gender::Other`.
    pub fn gender_code(&self, gender: Gender) -> Result<f64, EncodingError> {
        match (self, gender) {
            (_, Gender::Female) => Ok(0.0),
            (_, Gender::Male) => Ok(1.0),
            (Self::V2, Gender::Other) => Ok(2.0),
            (Self::V1, Gender::Other) => Err(EncodingError::UnsupportedCategory {
                attribute: Gender::ATTRIBUTE,
                value: gender.label().to_string(),
                schema: *self,
            }),
        }
    }

    /// Water intake code for a 1-3 level.
    #[must_use]
    pub fn water_code(&self, level: u8) -> f64 {
        match self {
            Self::V1 => f64::from(level),
            Self::V2 => f64::from(level) - 1.0,
        }
    }

    /// Inverse of `water_code`.
    #[must_use]
    pub fn water_level(&self, code: f64) -> f64 {
        match self {
            Self::V1 => code,
            Self::V2 => code + 1.0,
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            other => Err(format!("Unknown schema version: {other}")),
        }
    }
}

/// Frequency code (CAEC, CALC): Never 0 .. Always 3.
#[must_use]
pub fn frequency_code(frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Never => 0.0,
        Frequency::Sometimes => 1.0,
        Frequency::Frequently => 2.0,
        Frequency::Always => 3.0,
    }
}

/// Screen time code (TUE): Low 0, Moderate 1, High 2.
#[must_use]
pub fn screen_time_code(screen_time: ScreenTime) -> f64 {
    match screen_time {
        ScreenTime::Low => 0.0,
        ScreenTime::Moderate => 1.0,
        ScreenTime::High => 2.0,
    }
}

/// Transport code (MTRANS), alphabetical by survey label.
#[must_use]
pub fn transport_code(transport: Transport) -> f64 {
    match transport {
        Transport::Automobile => 0.0,
        Transport::Bike => 1.0,
        Transport::Motorbike => 2.0,
        Transport::PublicTransportation => 3.0,
        Transport::Walking => 4.0,
    }
}

/// Yes/no code: yes 1, no 0.
#[must_use]
pub fn flag_code(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Find the category whose code equals `code`.
///
/// # Errors
/// Returns `EncodingError::InvalidCode` if no variant maps to `code`.
pub fn decode_category<C, F>(
    code: f64,
    schema: SchemaVersion,
    attribute: &'static str,
    encode: F,
) -> Result<C, EncodingError>
where
    C: Category,
    F: Fn(C) -> Result<f64, EncodingError>,
{
    C::all()
        .iter()
        .copied()
        .find(|c| matches!(encode(*c), Ok(v) if v == code))
        .ok_or_else(|| EncodingError::InvalidCode {
            attribute,
            code: code.to_string(),
            schema,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_frequency_table() {
        let codes: Vec<f64> = Frequency::all().iter().map(|f| frequency_code(*f)).collect();
        assert_eq!(codes, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_tables_are_injective() {
        let transport: HashSet<u64> = Transport::all()
            .iter()
            .map(|t| transport_code(*t).to_bits())
            .collect();
        assert_eq!(transport.len(), Transport::all().len());

        let screen: HashSet<u64> = ScreenTime::all()
            .iter()
            .map(|s| screen_time_code(*s).to_bits())
            .collect();
        assert_eq!(screen.len(), ScreenTime::all().len());

        let frequency: HashSet<u64> = Frequency::all()
            .iter()
            .map(|f| frequency_code(*f).to_bits())
            .collect();
        assert_eq!(frequency.len(), Frequency::all().len());
    }

    #[test]
    fn test_gender_by_version() {
        assert_eq!(SchemaVersion::V1.gender_code(Gender::Male), Ok(1.0));
        assert_eq!(SchemaVersion::V2.gender_code(Gender::Other), Ok(2.0));
        assert!(matches!(
            SchemaVersion::V1.gender_code(Gender::Other),
            Err(EncodingError::UnsupportedCategory { schema: SchemaVersion::V1, .. })
        ));
    }

    #[test]
    fn test_water_by_version() {
        assert!((SchemaVersion::V1.water_code(2) - 2.0).abs() < f64::EPSILON);
        assert!((SchemaVersion::V2.water_code(2) - 1.0).abs() < f64::EPSILON);
        for version in SchemaVersion::ALL {
            for level in 1..=3u8 {
                let back = version.water_level(version.water_code(level));
                assert!((back - f64::from(level)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_verify_columns() {
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        assert!(SchemaVersion::V1.verify_columns(names.as_slice()).is_ok());

        let mut swapped = names.clone();
        swapped.swap(column::CAEC, column::CALC);
        assert_eq!(
            SchemaVersion::V1.verify_columns(swapped.as_slice()),
            Err(SchemaMismatchError::ColumnName {
                index: column::CAEC,
                expected: "CAEC".into(),
                actual: "CALC".into(),
            })
        );

        assert_eq!(
            SchemaVersion::V2.verify_columns(&names[..15]),
            Err(SchemaMismatchError::ColumnCount { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn test_decode_category() {
        let t: Transport = decode_category(3.0, SchemaVersion::V1, "MTRANS", |t| {
            Ok(transport_code(t))
        })
        .expect("Should decode");
        assert_eq!(t, Transport::PublicTransportation);

        let err = decode_category::<Gender, _>(2.0, SchemaVersion::V1, "Gender", |g| {
            SchemaVersion::V1.gender_code(g)
        });
        assert!(matches!(err, Err(EncodingError::InvalidCode { .. })));
    }

    #[test]
    fn test_version_parse() {
        assert_eq!("V2".parse::<SchemaVersion>(), Ok(SchemaVersion::V2));
        assert!("v3".parse::<SchemaVersion>().is_err());
        let json = serde_json::to_string(&SchemaVersion::V1).expect("serialize");
        assert_eq!(json, "\"v1\"");
    }
}
