//! # runcal_core - Running Calorie Estimation Engine
//!
//! `runcal_core` estimates the energy burned on a run from distance, time,
//! speed, body weight, sex and age, for outdoor or treadmill running. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Auditable**: Every coefficient lives in a constant table
//! - **Rich Errors**: Structured error types, validation reported in batch
//!
//! ## Quick Start
//!
//! ```rust
//! use runcal_core::form::{submit, Field, RunningForm};
//! use runcal_core::coefficients::RunningType;
//!
//! let form = RunningForm::default()
//!     .with_running_type(RunningType::Treadmill)
//!     .with_raw(Field::Distance, "5")
//!     .with_raw(Field::Time, "30")
//!     .with_raw(Field::Age, "35")
//!     .with_raw(Field::Weight, "68");
//!
//! let result = submit(&form).unwrap();
//! assert!(result.kilocalories.value() > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The calorie estimate
//! - [`coefficients`] - MET, sex and age tables
//! - [`form`] - Raw form state and batch validation
//! - [`units`] - Type-safe unit wrappers
//! - [`settings`] - Front-end preferences
//! - [`errors`] - Structured error types
//! - [`file_io`] - Settings files with atomic saves

pub mod calculations;
pub mod coefficients;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, estimate_calories, CalorieResult, RunningInput};
pub use coefficients::{RunningType, Sex};
pub use errors::{CalcError, CalcResult, FieldError, ValidationErrors};
pub use file_io::{load_settings, save_settings};
pub use form::{submit, Field, RunningForm};
pub use settings::{Settings, UnitSystem};
