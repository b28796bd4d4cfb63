//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`running`] - Calories burned on a run (outdoor or treadmill)

pub mod running;

pub use running::{
    calculate, calculate_batch, estimate_calories, BatchOutcome, CalorieResult, RunningInput,
};
