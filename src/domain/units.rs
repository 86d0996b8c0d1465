//! Height units.
//!
//! The questionnaire collects height either directly in meters or as a
//! feet/inches pair. Everything downstream works in meters.

use serde::{Deserialize, Serialize};

/// Meters per inch (exact, international inch).
pub const METERS_PER_INCH: f64 = 0.0254;

/// Inches per foot.
pub const INCHES_PER_FOOT: u32 = 12;

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Convert an imperial height to meters, rounded to 2 decimals.
///
/// `inches` is expected in `0..12`. Larger values are converted as-is;
/// callers that accept user input must reject them first.
#[must_use]
pub fn feet_inches_to_meters(feet: u32, inches: u32) -> f64 {
    let total_inches = f64::from(feet) * f64::from(INCHES_PER_FOOT) + f64::from(inches);
    round_to(total_inches * METERS_PER_INCH, 2)
}

/// Height as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Height {
    /// Height in meters
    Meters(f64),
    /// Height in feet and inches
    Imperial { feet: u32, inches: u32 },
}

impl Height {
    /// Height in meters.
    #[must_use]
    pub fn meters(&self) -> f64 {
        match *self {
            Self::Meters(m) => m,
            Self::Imperial { feet, inches } => feet_inches_to_meters(feet, inches),
        }
    }
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meters(m) => write!(f, "{m} meters"),
            Self::Imperial { feet, inches } => {
                write!(f, "{} meters (originally {feet}ft {inches}in)", self.meters())
            }
        }
    }
}
