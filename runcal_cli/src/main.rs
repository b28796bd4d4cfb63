//! # Runcal CLI Application
//!
//! Terminal front end for the running calorie calculator. Values can be
//! passed as flags; anything missing is prompted for on stdin.
//!
//! ```text
//! runcal --distance 10 --time 60 --age 30 --weight 70
//! runcal --units imperial --running-type treadmill --json
//! runcal --batch runs.json
//! ```

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use runcal_core::calculations::{calculate_batch, BatchOutcome};
use runcal_core::file_io::{load_settings_or_default, save_settings};
use runcal_core::{
    submit, CalcError, CalcResult, CalorieResult, Field, RunningForm, RunningInput, RunningType,
    Settings, Sex, UnitSystem,
};

const DISCLAIMER: &str = "This is an estimate and may not reflect your actual calorie burn.";

/// Calculate your running calories burned.
#[derive(Debug, Parser)]
#[command(name = "runcal", version, about)]
struct Args {
    /// Distance covered (km, or miles with --units imperial)
    #[arg(long)]
    distance: Option<f64>,

    /// Time in minutes
    #[arg(long)]
    time: Option<f64>,

    /// Average speed (km/h, or mph with --units imperial); derived from distance and time if omitted
    #[arg(long)]
    speed: Option<f64>,

    /// Age in years (1-120)
    #[arg(long)]
    age: Option<f64>,

    /// Body weight (kg, or lb with --units imperial)
    #[arg(long)]
    weight: Option<f64>,

    /// male or female
    #[arg(long)]
    sex: Option<String>,

    /// outdoor or treadmill
    #[arg(long)]
    running_type: Option<String>,

    /// metric or imperial
    #[arg(long)]
    units: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Never prompt; missing values are reported as validation errors
    #[arg(long)]
    no_prompt: bool,

    /// Settings file (JSON)
    #[arg(long, env = "RUNCAL_CONFIG")]
    config: Option<PathBuf>,

    /// Write the effective settings back to the --config file
    #[arg(long, requires = "config")]
    save_config: bool,

    /// Estimate every run in a JSON array of inputs
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "runcal=debug" } else { "runcal=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stderr keeps stdout clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Settings from the config file with command-line overrides applied
fn effective_settings(args: &Args) -> CalcResult<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_or_default(path)?,
        None => Settings::default(),
    };

    if let Some(units) = &args.units {
        settings.units = UnitSystem::from_str_flexible(units)?;
    }
    if let Some(running_type) = &args.running_type {
        settings.default_running_type = RunningType::from_str_flexible(running_type)?;
    }
    if let Some(sex) = &args.sex {
        settings.default_sex = Sex::from_str_flexible(sex)?;
    }

    Ok(settings)
}

/// Form pre-filled from flags. Distance and time go first so an explicit
/// speed overrides the derived one.
fn form_from_args(args: &Args, settings: &Settings) -> RunningForm {
    let values = [
        (Field::Distance, args.distance),
        (Field::Time, args.time),
        (Field::Speed, args.speed),
        (Field::Age, args.age),
        (Field::Weight, args.weight),
    ];

    values
        .into_iter()
        .fold(settings.blank_form(), |form, (field, value)| match value {
            Some(v) => form.with_field(field, Some(settings.units.to_metric(field, v))),
            None => form,
        })
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

/// Ask for every field that is still empty, in form order.
fn prompt_missing(mut form: RunningForm, units: UnitSystem) -> RunningForm {
    for field in Field::ALL {
        if form.get(field).is_some() {
            continue;
        }
        let value = prompt_line(&format!("{}: ", units.label(field)))
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .map(|v| units.to_metric(field, v));
        form = form.with_field(field, value);
    }
    form
}

fn print_result(form: &RunningForm, result: &CalorieResult) {
    let speed = form.speed_kmh.unwrap_or_default();
    println!("═══════════════════════════════════════");
    println!("  RUNNING CALORIES");
    println!("═══════════════════════════════════════");
    println!();
    println!("Run:");
    println!("  Type:      {}", form.running_type.display_name());
    println!("  Distance:  {:.2} km", form.distance_km.unwrap_or_default());
    println!("  Time:      {:.1} min", form.time_minutes.unwrap_or_default());
    println!("  Speed:     {:.1} km/h ({})", speed, result.speed_band);
    println!();
    println!("Factors:");
    println!("  MET:       {:.1}", result.met);
    println!("  Sex:       {:.2} ({})", result.sex_factor, form.sex.display_name());
    println!("  Age:       {:.3}", result.age_factor);
    println!();
    println!("  {:.1} kcal/km, {:.1} kcal/h", result.kcal_per_km, result.kcal_per_hour);
    println!();
    println!("═══════════════════════════════════════");
    println!("  Calories Burned: {:.1}", result.kilocalories.value());
    println!("═══════════════════════════════════════");
    println!();
    println!("Disclaimer: {}", DISCLAIMER);
}

fn print_json<T: serde::Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

/// Estimate every run in a JSON array file.
fn estimate_batch_file(path: &Path) -> CalcResult<Vec<BatchOutcome>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let inputs: Vec<RunningInput> =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    let outcomes = calculate_batch(&inputs);
    info!(runs = outcomes.len(), "batch estimated");
    Ok(outcomes)
}

/// A batch with any failed entry fails as a whole, so the exit code is 1.
fn batch_status(outcomes: &[BatchOutcome]) -> CalcResult<()> {
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Error { .. }))
        .count();
    if failed == 0 {
        return Ok(());
    }

    Err(CalcError::calculation_failed(
        "batch",
        format!("{} of {} runs failed", failed, outcomes.len()),
    ))
}

fn run_batch(path: &Path) -> CalcResult<()> {
    let outcomes = estimate_batch_file(path)?;
    // Every outcome is printed, failed ones included
    print_json(&outcomes)?;
    batch_status(&outcomes)
}

fn run(args: &Args) -> CalcResult<()> {
    let settings = effective_settings(args)?;

    if args.save_config {
        if let Some(path) = &args.config {
            save_settings(&settings, path)?;
            info!(path = %path.display(), "settings saved");
        }
    }

    if let Some(batch) = &args.batch {
        return run_batch(batch);
    }

    let mut form = form_from_args(args, &settings);
    if !args.no_prompt && io::stdin().is_terminal() && !form.missing_fields().is_empty() {
        println!("Calculate Your Running Calories Burned");
        println!();
        form = prompt_missing(form, settings.units);
    }
    debug!(?form, "submitting form");

    let result = submit(&form)?;

    if args.json {
        print_json(&result)
    } else {
        print_result(&form, &result);
        Ok(())
    }
}

/// Lines written to stderr for a failed run
fn error_lines(error: &CalcError, json: bool) -> Vec<String> {
    if json {
        return serde_json::to_string_pretty(error).into_iter().collect();
    }

    match error {
        CalcError::ValidationFailed { errors } => std::iter::once("Please fix the following:".to_string())
            .chain(errors.iter().map(|e| format!("  - {}", e.message)))
            .collect(),
        CalcError::CalculationFailed { reason, .. } => {
            vec!["Error calculating calories".to_string(), format!("  {}", reason)]
        }
        other => vec![format!("Error: {}", other)],
    }
}

fn report_error(error: &CalcError, json: bool) {
    for line in error_lines(error, json) {
        eprintln!("{}", line);
    }
}

/// 1 for input the user can fix, 2 for settings and I/O problems
fn exit_code(error: &CalcError) -> u8 {
    if error.is_input_error() {
        1
    } else {
        2
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(code = error.error_code(), "run failed");
            report_error(&error, args.json);
            ExitCode::from(exit_code(&error))
        }
    }
}
