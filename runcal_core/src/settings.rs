//! # Settings
//!
//! User preferences for front ends: which unit system values are typed in
//! and the default selections of a fresh form. Settings serialize to a
//! small JSON file (see [`crate::file_io`]).
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "units": "imperial",
//!   "default_running_type": "treadmill",
//!   "default_sex": "female"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::coefficients::{RunningType, Sex};
use crate::errors::{CalcError, CalcResult};
use crate::form::{Field, RunningForm};
use crate::units::{Kilograms, Kilometers, KilometersPerHour, Miles, MilesPerHour, Pounds};

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Unit system used for typed-in values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" | "km" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "mi" => Ok(UnitSystem::Imperial),
            _ => Err(CalcError::invalid_input("units", s, "Units must be 'metric' or 'imperial'")),
        }
    }

    /// Convert a value typed in this unit system to the metric value the
    /// form stores. Time and age are the same in both systems.
    pub fn to_metric(&self, field: Field, value: f64) -> f64 {
        match (self, field) {
            (UnitSystem::Metric, _) => value,
            (UnitSystem::Imperial, Field::Distance) => Kilometers::from(Miles(value)).0,
            (UnitSystem::Imperial, Field::Weight) => Kilograms::from(Pounds(value)).0,
            (UnitSystem::Imperial, Field::Speed) => KilometersPerHour::from(MilesPerHour(value)).0,
            (UnitSystem::Imperial, Field::Time | Field::Age) => value,
        }
    }

    /// Prompt label for a field in this unit system
    pub fn label(&self, field: Field) -> &'static str {
        match (self, field) {
            (UnitSystem::Imperial, Field::Distance) => "Distance (mi)",
            (UnitSystem::Imperial, Field::Weight) => "Weight (lb)",
            (UnitSystem::Imperial, Field::Speed) => "Speed (mph)",
            _ => field.label(),
        }
    }
}

/// Front-end preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version (e.g., "0.1.0")
    pub version: String,

    #[serde(default)]
    pub units: UnitSystem,

    #[serde(default)]
    pub default_running_type: RunningType,

    #[serde(default)]
    pub default_sex: Sex,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: SCHEMA_VERSION.to_string(),
            units: UnitSystem::default(),
            default_running_type: RunningType::default(),
            default_sex: Sex::default(),
        }
    }
}

impl Settings {
    /// A fresh form with this user's default selections
    pub fn blank_form(&self) -> RunningForm {
        RunningForm::new(self.default_running_type, self.default_sex)
    }
}
