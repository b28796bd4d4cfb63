//! # Running Calorie Estimate
//!
//! Estimates the energy a run costs from its speed, duration and the
//! runner's body weight, sex and age.
//!
//! ## Formula
//!
//! ```text
//! kcal = MET(speed band, running type) × sex factor × age factor × weight_kg × hours
//! hours = time_minutes / 60
//! ```
//!
//! 1 MET is taken as 1 kcal per kg per hour. The MET and factor tables are
//! in [`crate::coefficients`]. The estimate is rounded to 0.1 kcal.
//!
//! ## Guarantees
//!
//! - Never returns NaN, infinity or a negative number
//! - Non-decreasing in `speed_kmh` and in `weight_kg` when everything else
//!   is held fixed
//! - Deterministic: the same input gives bit-identical output
//!
//! ## Example
//!
//! ```rust
//! use runcal_core::calculations::running::{calculate, RunningInput};
//! use runcal_core::coefficients::{RunningType, Sex};
//!
//! let input = RunningInput {
//!     distance_km: 10.0,
//!     time_minutes: 60.0,
//!     running_type: RunningType::Outdoor,
//!     sex: Sex::Male,
//!     age_years: 30.0,
//!     weight_kg: 70.0,
//!     speed_kmh: 10.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! // 9.8 MET × 1.0 × 1.0 × 70 kg × 1 h
//! assert_eq!(result.kilocalories.value(), 686.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coefficients::{
    age_factor, band_index, band_label, sex_factor, RunningType, Sex, MET_BANDS,
};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Hours, Kilocalories, Kilometers, KilometersPerHour, Minutes};

const CALCULATION_TYPE: &str = "running_calories";

/// Lowest accepted age in years (inclusive)
pub const MIN_AGE_YEARS: f64 = 1.0;

/// Highest accepted age in years (inclusive)
pub const MAX_AGE_YEARS: f64 = 120.0;

/// A finalized description of one run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "distance_km": 5.0,
///   "time_minutes": 25.0,
///   "running_type": "treadmill",
///   "sex": "female",
///   "age_years": 34.0,
///   "weight_kg": 61.5,
///   "speed_kmh": 12.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningInput {
    /// Distance covered in kilometers
    pub distance_km: f64,

    /// Elapsed time in minutes
    pub time_minutes: f64,

    /// Outdoor or treadmill
    pub running_type: RunningType,

    /// Selects the sex factor
    pub sex: Sex,

    /// Age in years, 1 to 120 inclusive
    pub age_years: f64,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Average speed in km/h. Usually derived from distance and time but
    /// may be supplied independently.
    pub speed_kmh: f64,
}

impl RunningInput {
    /// Build an input whose speed is derived from distance and time.
    ///
    /// Fails when the time is not positive, since no speed can be derived.
    pub fn from_distance_time(
        distance_km: f64,
        time_minutes: f64,
        running_type: RunningType,
        sex: Sex,
        age_years: f64,
        weight_kg: f64,
    ) -> CalcResult<Self> {
        let speed = KilometersPerHour::from_distance_time(Kilometers(distance_km), Minutes(time_minutes))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "time_minutes",
                    time_minutes.to_string(),
                    "Time must be a positive number",
                )
            })?;

        Ok(RunningInput {
            distance_km,
            time_minutes,
            running_type,
            sex,
            age_years,
            weight_kg,
            speed_kmh: speed.0,
        })
    }

    /// Duration of the run in hours
    pub fn duration_hours(&self) -> f64 {
        Hours::from(Minutes(self.time_minutes)).0
    }

    /// Check the numeric preconditions of the estimator.
    ///
    /// Form validation normally guarantees these; this check exists so a
    /// caller that skipped validation gets an error instead of a corrupted
    /// number.
    pub fn check_domain(&self) -> CalcResult<()> {
        let positive = [
            ("distance_km", self.distance_km),
            ("time_minutes", self.time_minutes),
            ("weight_kg", self.weight_kg),
            ("speed_kmh", self.speed_kmh),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(domain_error(field, value, "must be a positive finite number"));
            }
        }

        if !self.age_years.is_finite()
            || self.age_years < MIN_AGE_YEARS
            || self.age_years > MAX_AGE_YEARS
        {
            return Err(domain_error("age_years", self.age_years, "must be between 1 and 120"));
        }

        Ok(())
    }
}

fn domain_error(field: &str, value: f64, reason: &str) -> CalcError {
    warn!(field, value, "estimator rejected out-of-domain input");
    CalcError::calculation_failed(CALCULATION_TYPE, format!("{} = {} {}", field, value, reason))
}

/// Results of a calorie estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kilocalories": 686.0,
///   "met": 9.8,
///   "speed_band": "9.7-10.8 km/h",
///   "sex_factor": 1.0,
///   "age_factor": 1.0,
///   "duration_hours": 1.0,
///   "kcal_per_km": 68.6,
///   "kcal_per_hour": 686.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieResult {
    /// Estimated energy burned, rounded to 0.1 kcal
    pub kilocalories: Kilocalories,

    /// MET value taken from the table for this speed and running type
    pub met: f64,

    /// Speed band the MET came from
    pub speed_band: String,

    /// Multiplier for sex
    pub sex_factor: f64,

    /// Multiplier for age
    pub age_factor: f64,

    /// Duration used in the formula (hours)
    pub duration_hours: f64,

    /// Energy per kilometer covered
    pub kcal_per_km: f64,

    /// Energy per hour of running
    pub kcal_per_hour: f64,
}

/// Round to one decimal place
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate the calories burned on a run, with the full breakdown.
///
/// # Returns
///
/// * `Ok(CalorieResult)` - The estimate
/// * `Err(CalcError::CalculationFailed)` - Non-finite or out-of-domain input
pub fn calculate(input: &RunningInput) -> CalcResult<CalorieResult> {
    input.check_domain()?;

    let band = band_index(input.speed_kmh);
    let met = MET_BANDS[band].met(input.running_type);
    let sex_f = sex_factor(input.sex);
    let age_f = age_factor(input.age_years);
    let duration_hours = input.duration_hours();

    let raw_per_hour = met * sex_f * age_f * input.weight_kg;
    let raw_kcal = raw_per_hour * duration_hours;

    let kilocalories = round_to_tenth(raw_kcal);
    let kcal_per_km = round_to_tenth(raw_kcal / input.distance_km);
    let kcal_per_hour = round_to_tenth(raw_per_hour);

    // In-domain inputs can still overflow, in the product, the rounding or
    // the per-km division by a tiny distance
    let finite = [kilocalories, kcal_per_km, kcal_per_hour]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
    if !finite {
        warn!(kilocalories, kcal_per_km, kcal_per_hour, "estimate overflowed");
        return Err(CalcError::calculation_failed(
            CALCULATION_TYPE,
            "estimate is not a finite non-negative number",
        ));
    }

    debug!(
        running_type = input.running_type.as_str(),
        sex = input.sex.as_str(),
        speed_kmh = input.speed_kmh,
        band,
        met,
        kilocalories,
        "calorie estimate"
    );

    Ok(CalorieResult {
        kilocalories: Kilocalories(kilocalories),
        met,
        speed_band: band_label(band),
        sex_factor: sex_f,
        age_factor: age_f,
        duration_hours,
        kcal_per_km,
        kcal_per_hour,
    })
}

/// Estimate the calories burned on a run as a single number.
pub fn estimate_calories(input: &RunningInput) -> CalcResult<f64> {
    calculate(input).map(|result| result.kilocalories.value())
}

/// Outcome of one entry in a batch; each entry is estimated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Ok { result: CalorieResult },
    Error { error: CalcError },
}

/// Estimate every input, keeping going past failures.
pub fn calculate_batch(inputs: &[RunningInput]) -> Vec<BatchOutcome> {
    inputs
        .iter()
        .map(|input| match calculate(input) {
            Ok(result) => BatchOutcome::Ok { result },
            Err(error) => BatchOutcome::Error { error },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_run() -> RunningInput {
        RunningInput {
            distance_km: 10.0,
            time_minutes: 60.0,
            running_type: RunningType::Outdoor,
            sex: Sex::Male,
            age_years: 30.0,
            weight_kg: 70.0,
            speed_kmh: 10.0,
        }
    }

    #[test]
    fn test_reference_estimate() {
        let result = calculate(&test_run()).unwrap();

        // 9.8 MET × 70 kg × 1 h
        assert_eq!(result.met, 9.8);
        assert_eq!(result.kilocalories, Kilocalories(686.0));
        assert_eq!(result.kcal_per_km, 68.6);
        assert_eq!(result.speed_band, "9.7-10.8 km/h");
    }

    #[test]
    fn test_female_and_age_factors_apply() {
        let mut run = test_run();
        run.sex = Sex::Female;
        run.age_years = 40.0;
        let result = calculate(&run).unwrap();

        // 9.8 × 0.95 × 0.97 × 70 × 1 = 632.149
        assert!((result.kilocalories.value() - 632.1).abs() < 1e-9);
        assert_eq!(result.sex_factor, 0.95);
    }

    #[test]
    fn test_treadmill_differs_from_outdoor() {
        let outdoor = calculate(&test_run()).unwrap();
        let mut run = test_run();
        run.running_type = RunningType::Treadmill;
        let treadmill = calculate(&run).unwrap();

        assert!(treadmill.kilocalories < outdoor.kilocalories);
        assert_eq!(treadmill.met, 9.4);
    }

    #[test]
    fn test_half_hour_halves_estimate() {
        let mut run = test_run();
        run.time_minutes = 30.0;
        run.distance_km = 5.0;
        assert_eq!(estimate_calories(&run).unwrap(), 343.0);
    }

    #[test]
    fn test_from_distance_time_derives_speed() {
        let run = RunningInput::from_distance_time(10.0, 60.0, RunningType::Outdoor, Sex::Male, 30.0, 70.0).unwrap();
        assert_eq!(run.speed_kmh, 10.0);
        assert_eq!(run, test_run());

        assert!(RunningInput::from_distance_time(10.0, 0.0, RunningType::Outdoor, Sex::Male, 30.0, 70.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let mut run = test_run();
        run.weight_kg = f64::NAN;
        let err = calculate(&run).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");

        let mut run = test_run();
        run.speed_kmh = f64::INFINITY;
        assert!(calculate(&run).is_err());
    }

    #[test]
    fn test_rejects_out_of_domain_input() {
        let mut run = test_run();
        run.age_years = 121.0;
        assert!(calculate(&run).is_err());

        let mut run = test_run();
        run.distance_km = -1.0;
        assert!(calculate(&run).is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut run = test_run();
        run.weight_kg = f64::MAX;
        run.time_minutes = f64::MAX;
        assert!(calculate(&run).is_err());
    }

    #[test]
    fn test_overflow_during_rounding_is_rejected() {
        // The raw product is finite but ×10 for rounding is not
        let mut run = test_run();
        run.weight_kg = 1e307;
        let err = calculate(&run).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_tiny_distance_never_yields_infinite_rate() {
        let mut run = test_run();
        run.distance_km = 1e-310;

        // 686 kcal / 1e-310 km overflows even though the total is fine
        let err = calculate(&run).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_batch_keeps_going_after_failure() {
        let mut bad = test_run();
        bad.speed_kmh = 0.0;
        let outcomes = calculate_batch(&[test_run(), bad, test_run()]);

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], BatchOutcome::Ok { .. }));
        assert!(matches!(outcomes[1], BatchOutcome::Error { .. }));
        assert!(matches!(outcomes[2], BatchOutcome::Ok { .. }));
    }

    #[test]
    fn test_serialization() {
        let run = test_run();
        let json = serde_json::to_string_pretty(&run).unwrap();
        assert!(json.contains("\"running_type\": \"outdoor\""));
        let roundtrip: RunningInput = serde_json::from_str(&json).unwrap();
        assert_eq!(run, roundtrip);
    }
}
