//! # File I/O Module
//!
//! Loads and saves [`Settings`] files:
//! - **Atomic saves**: Write to .json.tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use runcal_core::file_io::{load_settings, save_settings};
//! use runcal_core::settings::Settings;
//! use std::path::Path;
//!
//! let path = Path::new("runcal.json");
//! save_settings(&Settings::default(), path).unwrap();
//! let settings = load_settings(path).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::settings::{Settings, SCHEMA_VERSION};

/// Save settings with an atomic write.
///
/// The file is written to `<stem>.json.tmp` first and renamed over `path`
/// only after the data has been synced to disk.
pub fn save_settings(settings: &Settings, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(settings).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");
    let path_str = path.display().to_string();

    {
        let mut file = File::create(&tmp_path)
            .map_err(|e| CalcError::file_error("create", tmp_path.display().to_string(), e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CalcError::file_error("write", tmp_path.display().to_string(), e.to_string()))?;
        file.sync_all()
            .map_err(|e| CalcError::file_error("sync", tmp_path.display().to_string(), e.to_string()))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename", path_str.clone(), e.to_string())
    })?;

    debug!(path = %path_str, "saved settings");
    Ok(())
}

/// Load settings from a JSON file and check its schema version.
pub fn load_settings(path: &Path) -> CalcResult<Settings> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: Settings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.version)?;

    debug!(path = %path.display(), units = ?settings.units, "loaded settings");
    Ok(settings)
}

/// Load settings, falling back to defaults when the file does not exist.
///
/// Any other failure (unreadable, bad JSON, wrong version) is still an error.
pub fn load_settings_or_default(path: &Path) -> CalcResult<Settings> {
    if path.exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::Sex;
    use crate::settings::UnitSystem;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_settings_path(name: &str) -> PathBuf {
        temp_dir().join(format!("runcal_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_settings_path("roundtrip");

        let settings = Settings {
            units: UnitSystem::Imperial,
            default_sex: Sex::Female,
            ..Settings::default()
        };
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_settings_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        save_settings(&Settings::default(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let path = temp_settings_path("does_not_exist");
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let settings = load_settings_or_default(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let path = temp_settings_path("bad_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("abc").is_err());
        assert!(validate_version("").is_err());
    }

    #[test]
    fn test_newer_file_version_rejected_on_load() {
        let path = temp_settings_path("newer");
        fs::write(&path, r#"{ "version": "0.9.0" }"#).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }
}
