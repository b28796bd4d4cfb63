//! # Coefficient Tables
//!
//! Lookup data used by the running calorie estimator. Everything the
//! formula depends on lives here as plain constants so it can be audited
//! and tested without running an estimate.
//!
//! ## MET by speed band
//!
//! The outdoor column follows the running entries of the 2011 Compendium
//! of Physical Activities (codes 12020-12180, converted from mph). The
//! treadmill column is 3-7% lower than outdoor because a belt removes air
//! resistance; the gap widens with speed.
//!
//! | from km/h | outdoor | treadmill |
//! |-----------|---------|-----------|
//! | 0.0       | 6.0     | 5.8       |
//! | 8.0       | 8.3     | 8.0       |
//! | 8.4       | 9.0     | 8.7       |
//! | 9.7       | 9.8     | 9.4       |
//! | 10.8      | 10.5    | 10.0      |
//! | 11.3      | 11.0    | 10.5      |
//! | 12.1      | 11.5    | 10.9      |
//! | 12.9      | 11.8    | 11.2      |
//! | 13.8      | 12.3    | 11.6      |
//! | 14.5      | 12.8    | 12.0      |
//! | 16.1      | 14.5    | 13.6      |
//! | 17.7      | 16.0    | 15.0      |
//! | 19.3      | 19.0    | 17.8      |
//! | 20.9      | 19.8    | 18.5      |
//! | 22.5      | 23.0    | 21.5      |
//!
//! ## Example
//!
//! ```rust
//! use runcal_core::coefficients::{met_for, RunningType};
//!
//! assert_eq!(met_for(10.0, RunningType::Outdoor), 9.8);
//! assert_eq!(met_for(10.0, RunningType::Treadmill), 9.4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Where the run took place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningType {
    #[default]
    Outdoor,
    Treadmill,
}

impl RunningType {
    /// All running types for UI selection
    pub const ALL: [RunningType; 2] = [RunningType::Outdoor, RunningType::Treadmill];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunningType::Outdoor => "outdoor",
            RunningType::Treadmill => "treadmill",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "outdoor" | "outdoors" | "outside" | "road" | "track" => Ok(RunningType::Outdoor),
            "treadmill" | "tm" | "indoor" => Ok(RunningType::Treadmill),
            _ => Err(CalcError::invalid_input(
                "running_type",
                s,
                "Running type must be 'outdoor' or 'treadmill'",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RunningType::Outdoor => "Outdoor",
            RunningType::Treadmill => "Treadmill",
        }
    }
}

/// Biological sex, selecting the coefficient set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// All variants for UI selection
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Ok(Sex::Male),
            "female" | "f" | "woman" => Ok(Sex::Female),
            _ => Err(CalcError::invalid_input("sex", s, "Sex must be 'male' or 'female'")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// One row of the MET table: applies from `min_speed_kmh` up to the next row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetBand {
    /// Inclusive lower bound of the band (km/h)
    pub min_speed_kmh: f64,
    /// MET for running outside
    pub outdoor: f64,
    /// MET for running on a level treadmill
    pub treadmill: f64,
}

impl MetBand {
    const fn new(min_speed_kmh: f64, outdoor: f64, treadmill: f64) -> Self {
        MetBand {
            min_speed_kmh,
            outdoor,
            treadmill,
        }
    }

    /// MET value for the given running type
    pub fn met(&self, running_type: RunningType) -> f64 {
        match running_type {
            RunningType::Outdoor => self.outdoor,
            RunningType::Treadmill => self.treadmill,
        }
    }
}

/// MET table, sorted by ascending `min_speed_kmh`. The first row starts at 0.
pub static MET_BANDS: [MetBand; 15] = [
    MetBand::new(0.0, 6.0, 5.8),
    MetBand::new(8.0, 8.3, 8.0),
    MetBand::new(8.4, 9.0, 8.7),
    MetBand::new(9.7, 9.8, 9.4),
    MetBand::new(10.8, 10.5, 10.0),
    MetBand::new(11.3, 11.0, 10.5),
    MetBand::new(12.1, 11.5, 10.9),
    MetBand::new(12.9, 11.8, 11.2),
    MetBand::new(13.8, 12.3, 11.6),
    MetBand::new(14.5, 12.8, 12.0),
    MetBand::new(16.1, 14.5, 13.6),
    MetBand::new(17.7, 16.0, 15.0),
    MetBand::new(19.3, 19.0, 17.8),
    MetBand::new(20.9, 19.8, 18.5),
    MetBand::new(22.5, 23.0, 21.5),
];

/// Multiplier applied per sex
pub const SEX_FACTORS: [(Sex, f64); 2] = [(Sex::Male, 1.00), (Sex::Female, 0.95)];

/// Age at which the age factor is exactly 1.0
pub const AGE_REFERENCE_YEARS: f64 = 30.0;

/// Change in the age factor per year away from the reference age
pub const AGE_FACTOR_PER_YEAR: f64 = 0.003;

/// Age factor is clamped to this range
pub const AGE_FACTOR_MIN: f64 = 0.85;
pub const AGE_FACTOR_MAX: f64 = 1.05;

/// Find the band a speed falls into.
///
/// Speeds below zero (or NaN) fall into the first band; callers are
/// expected to have rejected those already.
pub fn band_for(speed_kmh: f64) -> &'static MetBand {
    MET_BANDS
        .iter()
        .rev()
        .find(|band| speed_kmh >= band.min_speed_kmh)
        .unwrap_or(&MET_BANDS[0])
}

/// Index of the band a speed falls into
pub fn band_index(speed_kmh: f64) -> usize {
    MET_BANDS
        .iter()
        .rposition(|band| speed_kmh >= band.min_speed_kmh)
        .unwrap_or(0)
}

/// Human-readable label for a band, e.g. "9.7-10.8 km/h" or "22.5+ km/h"
pub fn band_label(index: usize) -> String {
    let index = index.min(MET_BANDS.len() - 1);
    let lower = MET_BANDS[index].min_speed_kmh;
    match MET_BANDS.get(index + 1) {
        Some(next) => format!("{:.1}-{:.1} km/h", lower, next.min_speed_kmh),
        None => format!("{:.1}+ km/h", lower),
    }
}

/// MET for running at `speed_kmh` on the given surface
pub fn met_for(speed_kmh: f64, running_type: RunningType) -> f64 {
    band_for(speed_kmh).met(running_type)
}

/// Multiplier for the given sex
pub fn sex_factor(sex: Sex) -> f64 {
    SEX_FACTORS
        .iter()
        .find(|(s, _)| *s == sex)
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}

/// Small metabolic adjustment for age: +/-0.3% per year from 30, clamped.
pub fn age_factor(age_years: f64) -> f64 {
    let raw = 1.0 - AGE_FACTOR_PER_YEAR * (age_years - AGE_REFERENCE_YEARS);
    raw.clamp(AGE_FACTOR_MIN, AGE_FACTOR_MAX)
}
