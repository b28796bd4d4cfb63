//! # Running Calculator Form
//!
//! Raw, possibly-invalid form state plus the validator that turns it into
//! a [`RunningInput`].
//!
//! The form is a plain value: every update returns a new `RunningForm`.
//! Changing distance or time re-derives the speed with [`derive_speed_kmh`]
//! whenever the time is positive; typing a speed directly overrides it
//! until distance or time change again.
//!
//! ## Example
//!
//! ```rust
//! use runcal_core::form::{Field, RunningForm};
//!
//! let form = RunningForm::default()
//!     .with_raw(Field::Distance, "10")
//!     .with_raw(Field::Time, "60")
//!     .with_raw(Field::Age, "30")
//!     .with_raw(Field::Weight, "70");
//!
//! // Speed was derived from distance and time
//! assert_eq!(form.speed_kmh, Some(10.0));
//!
//! let input = form.validate().unwrap();
//! assert_eq!(input.speed_kmh, 10.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::running::{calculate, CalorieResult, RunningInput, MAX_AGE_YEARS, MIN_AGE_YEARS};
use crate::coefficients::{RunningType, Sex};
use crate::errors::{CalcError, CalcResult, ValidationErrors};

/// Numeric fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Distance,
    Time,
    Age,
    Weight,
    Speed,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 5] = [
        Field::Distance,
        Field::Time,
        Field::Age,
        Field::Weight,
        Field::Speed,
    ];

    /// Name of the matching `RunningInput` field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Distance => "distance_km",
            Field::Time => "time_minutes",
            Field::Age => "age_years",
            Field::Weight => "weight_kg",
            Field::Speed => "speed_kmh",
        }
    }

    /// Label shown next to the input box
    pub fn label(&self) -> &'static str {
        match self {
            Field::Distance => "Distance (km)",
            Field::Time => "Time (minutes)",
            Field::Age => "Age",
            Field::Weight => "Weight (kg)",
            Field::Speed => "Speed (km/h)",
        }
    }

    /// Message reported when the field fails validation
    pub fn error_message(&self) -> &'static str {
        match self {
            Field::Distance => "Distance must be a positive number",
            Field::Time => "Time must be a positive number",
            Field::Age => "Age must be a number between 1 and 120",
            Field::Weight => "Weight must be a positive number",
            Field::Speed => "Speed must be a positive number",
        }
    }

    /// Parse a field name as the form posts it ("distance") or as the
    /// input struct names it ("distance_km")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "distance" | "distance_km" => Ok(Field::Distance),
            "time" | "time_minutes" => Ok(Field::Time),
            "age" | "age_years" => Ok(Field::Age),
            "weight" | "weight_kg" => Ok(Field::Weight),
            "speed" | "speed_kmh" => Ok(Field::Speed),
            _ => Err(CalcError::invalid_input("field", s, "Unknown form field")),
        }
    }
}

/// Speed implied by distance and time.
///
/// `None` unless the time is positive. A missing distance with a positive
/// time yields `Some(None)`: the derived speed is unknown and replaces any
/// previous value.
pub fn derive_speed_kmh(distance_km: Option<f64>, time_minutes: Option<f64>) -> Option<Option<f64>> {
    match time_minutes {
        Some(time) if time > 0.0 => Some(distance_km.map(|d| d / (time / 60.0))),
        _ => None,
    }
}

/// Parse user text into a number; anything unparsable is `None`
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// State of the running calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunningForm {
    pub distance_km: Option<f64>,
    pub time_minutes: Option<f64>,
    pub running_type: RunningType,
    pub sex: Sex,
    pub age_years: Option<f64>,
    pub weight_kg: Option<f64>,
    pub speed_kmh: Option<f64>,
}

impl RunningForm {
    /// Empty form with the given selections
    pub fn new(running_type: RunningType, sex: Sex) -> Self {
        RunningForm {
            running_type,
            sex,
            ..Self::default()
        }
    }

    /// Current value of a numeric field
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Distance => self.distance_km,
            Field::Time => self.time_minutes,
            Field::Age => self.age_years,
            Field::Weight => self.weight_kg,
            Field::Speed => self.speed_kmh,
        }
    }

    /// Form with one numeric field replaced.
    pub fn with_field(self, field: Field, value: Option<f64>) -> Self {
        let mut next = self;
        match field {
            Field::Distance => next.distance_km = value,
            Field::Time => next.time_minutes = value,
            Field::Age => next.age_years = value,
            Field::Weight => next.weight_kg = value,
            Field::Speed => next.speed_kmh = value,
        }

        if matches!(field, Field::Distance | Field::Time) {
            if let Some(speed) = derive_speed_kmh(next.distance_km, next.time_minutes) {
                next.speed_kmh = speed;
            }
        }
        next
    }

    /// Form with one numeric field replaced by parsed user text
    pub fn with_raw(self, field: Field, raw: &str) -> Self {
        self.with_field(field, parse_number(raw))
    }

    pub fn with_running_type(self, running_type: RunningType) -> Self {
        RunningForm { running_type, ..self }
    }

    pub fn with_sex(self, sex: Sex) -> Self {
        RunningForm { sex, ..self }
    }

    /// Fields that have no value yet
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    /// Check every field and build the estimator input.
    ///
    /// All problems are reported together.
    pub fn validate(&self) -> Result<RunningInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in Field::ALL {
            let ok = match (field, self.get(field)) {
                (_, None) => false,
                (_, Some(v)) if !v.is_finite() => false,
                (Field::Age, Some(age)) => (MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age),
                (_, Some(v)) => v > 0.0,
            };
            if !ok {
                errors.push(field.key(), field.error_message());
            }
        }

        errors.into_result(|| RunningInput {
            distance_km: self.distance_km.unwrap_or_default(),
            time_minutes: self.time_minutes.unwrap_or_default(),
            running_type: self.running_type,
            sex: self.sex,
            age_years: self.age_years.unwrap_or_default(),
            weight_kg: self.weight_kg.unwrap_or_default(),
            speed_kmh: self.speed_kmh.unwrap_or_default(),
        })
    }
}

impl From<&RunningInput> for RunningForm {
    fn from(input: &RunningInput) -> Self {
        RunningForm {
            distance_km: Some(input.distance_km),
            time_minutes: Some(input.time_minutes),
            running_type: input.running_type,
            sex: input.sex,
            age_years: Some(input.age_years),
            weight_kg: Some(input.weight_kg),
            speed_kmh: Some(input.speed_kmh),
        }
    }
}

/// Validate the form and, only if it is valid, run the estimate.
pub fn submit(form: &RunningForm) -> CalcResult<CalorieResult> {
    let input = form.validate()?;
    calculate(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RunningForm {
        RunningForm::default()
            .with_field(Field::Distance, Some(10.0))
            .with_field(Field::Time, Some(60.0))
            .with_field(Field::Age, Some(30.0))
            .with_field(Field::Weight, Some(70.0))
    }

    #[test]
    fn test_defaults_match_form() {
        let form = RunningForm::default();
        assert_eq!(form.running_type, RunningType::Outdoor);
        assert_eq!(form.sex, Sex::Male);
        assert_eq!(form.missing_fields().len(), 5);
    }

    #[test]
    fn test_speed_derived_from_distance_and_time() {
        let form = RunningForm::default()
            .with_field(Field::Distance, Some(5.0))
            .with_field(Field::Time, Some(25.0));
        assert!((form.speed_kmh.unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_not_derived_without_time() {
        let form = RunningForm::default()
            .with_field(Field::Speed, Some(11.0))
            .with_field(Field::Distance, Some(5.0));
        assert_eq!(form.speed_kmh, Some(11.0));

        let form = form.with_field(Field::Time, Some(0.0));
        assert_eq!(form.speed_kmh, Some(11.0));
    }

    #[test]
    fn test_speed_override_until_distance_changes() {
        let form = filled_form().with_field(Field::Speed, Some(12.0));
        assert_eq!(form.speed_kmh, Some(12.0));

        let form = form.with_field(Field::Distance, Some(8.0));
        assert_eq!(form.speed_kmh, Some(8.0));
    }

    #[test]
    fn test_updates_leave_original_untouched() {
        let before = filled_form();
        let after = before.with_field(Field::Weight, Some(80.0));
        assert_eq!(before.weight_kg, Some(70.0));
        assert_eq!(after.weight_kg, Some(80.0));
    }

    #[test]
    fn test_raw_text_parsing() {
        let form = RunningForm::default().with_raw(Field::Age, " 42 ");
        assert_eq!(form.age_years, Some(42.0));

        let form = form.with_raw(Field::Age, "forty");
        assert_eq!(form.age_years, None);

        let form = form.with_raw(Field::Age, "NaN");
        assert_eq!(form.age_years, None);
    }

    #[test]
    fn test_valid_form() {
        let input = filled_form().validate().unwrap();
        assert_eq!(input.distance_km, 10.0);
        assert_eq!(input.speed_kmh, 10.0);
    }

    #[test]
    fn test_all_errors_reported_together() {
        let form = RunningForm::default()
            .with_field(Field::Speed, Some(0.0))
            .with_field(Field::Distance, Some(0.0))
            .with_field(Field::Age, Some(200.0))
            .with_field(Field::Weight, Some(-5.0));

        let errors = form.validate().unwrap_err();
        let messages = errors.messages();
        assert!(messages.contains(&"Distance must be a positive number"));
        assert!(messages.contains(&"Age must be a number between 1 and 120"));
        assert!(messages.contains(&"Weight must be a positive number"));
        assert!(messages.contains(&"Speed must be a positive number"));
        assert!(messages.contains(&"Time must be a positive number"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_age_bounds_inclusive() {
        for (age, ok) in [(0.0, false), (1.0, true), (120.0, true), (121.0, false)] {
            let form = filled_form().with_field(Field::Age, Some(age));
            assert_eq!(form.validate().is_ok(), ok, "age {}", age);
        }
    }

    #[test]
    fn test_submit_returns_validation_error() {
        let err = submit(&RunningForm::default()).unwrap_err();
        match err {
            CalcError::ValidationFailed { errors } => assert_eq!(errors.len(), 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_submit_valid_form() {
        let result = submit(&filled_form()).unwrap();
        assert_eq!(result.kilocalories.value(), 686.0);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::from_str_flexible("distance").unwrap(), Field::Distance);
        assert_eq!(Field::from_str_flexible("weight_kg").unwrap(), Field::Weight);
        assert!(Field::from_str_flexible("pace").is_err());
    }
}
