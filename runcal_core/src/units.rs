//! # Unit Types
//!
//! Type-safe wrappers for the units a run is described in. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers that serialize as bare numbers).
//!
//! ## Metric (Primary)
//!
//! The estimator works in metric internally:
//! - Distance: kilometers (km)
//! - Time: minutes (min), hours (h)
//! - Speed: kilometers per hour (km/h)
//! - Mass: kilograms (kg)
//! - Energy: kilocalories (kcal)
//!
//! Imperial wrappers (miles, mph, pounds) exist so front ends can accept
//! imperial values and convert before validation.
//!
//! ## Example
//!
//! ```rust
//! use runcal_core::units::{Kilometers, Miles, Pounds, Kilograms};
//!
//! let km: Kilometers = Miles(1.0).into();
//! assert!((km.0 - 1.609344).abs() < 1e-9);
//!
//! let kg: Kilograms = Pounds(150.0).into();
//! assert!((kg.0 - 68.0388).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Kilometers in one statute mile
pub const KM_PER_MILE: f64 = 1.609344;

/// Kilograms in one avoirdupois pound
pub const KG_PER_POUND: f64 = 0.45359237;

// ============================================================================
// Distance Units
// ============================================================================

/// Distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometers(pub f64);

/// Distance in miles
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Miles(pub f64);

impl From<Miles> for Kilometers {
    fn from(mi: Miles) -> Self {
        Kilometers(mi.0 * KM_PER_MILE)
    }
}

impl From<Kilometers> for Miles {
    fn from(km: Kilometers) -> Self {
        Miles(km.0 / KM_PER_MILE)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / 60.0)
    }
}

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}

// ============================================================================
// Speed Units
// ============================================================================

/// Speed in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilometersPerHour(pub f64);

/// Speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilesPerHour(pub f64);

impl From<MilesPerHour> for KilometersPerHour {
    fn from(mph: MilesPerHour) -> Self {
        KilometersPerHour(mph.0 * KM_PER_MILE)
    }
}

impl From<KilometersPerHour> for MilesPerHour {
    fn from(kmh: KilometersPerHour) -> Self {
        MilesPerHour(kmh.0 / KM_PER_MILE)
    }
}

impl KilometersPerHour {
    /// Average speed over `distance` covered in `time`.
    ///
    /// Returns `None` when the time is not positive.
    pub fn from_distance_time(distance: Kilometers, time: Minutes) -> Option<Self> {
        let hours = Hours::from(time);
        if hours.0 > 0.0 {
            Some(KilometersPerHour(distance.0 / hours.0))
        } else {
            None
        }
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Body mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Body mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_POUND)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 / KG_PER_POUND)
    }
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy in kilocalories (the "Calories" on food labels)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilocalories(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Kilometers);
impl_arithmetic!(Miles);
impl_arithmetic!(Minutes);
impl_arithmetic!(Hours);
impl_arithmetic!(KilometersPerHour);
impl_arithmetic!(MilesPerHour);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Pounds);
impl_arithmetic!(Kilocalories);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miles_to_kilometers() {
        let km: Kilometers = Miles(10.0).into();
        assert!((km.0 - 16.09344).abs() < 1e-9);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let kg: Kilograms = Pounds(220.0).into();
        assert!((kg.0 - 99.79).abs() < 0.01);
    }

    #[test]
    fn test_minutes_to_hours() {
        let h: Hours = Minutes(90.0).into();
        assert_eq!(h.0, 1.5);
    }

    #[test]
    fn test_speed_from_distance_time() {
        let speed = KilometersPerHour::from_distance_time(Kilometers(10.0), Minutes(60.0)).unwrap();
        assert_eq!(speed.0, 10.0);

        let speed = KilometersPerHour::from_distance_time(Kilometers(5.0), Minutes(25.0)).unwrap();
        assert!((speed.0 - 12.0).abs() < 1e-9);

        assert!(KilometersPerHour::from_distance_time(Kilometers(5.0), Minutes(0.0)).is_none());
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilometers(10.0);
        let b = Kilometers(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let kcal = Kilocalories(512.5);
        let json = serde_json::to_string(&kcal).unwrap();
        assert_eq!(json, "512.5");

        let roundtrip: Kilocalories = serde_json::from_str(&json).unwrap();
        assert_eq!(kcal, roundtrip);
    }
}
