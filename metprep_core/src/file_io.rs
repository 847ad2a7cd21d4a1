//! # File I/O Module
//!
//! JSON file operations for worksheets and settings:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Refuse worksheets from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use metprep_core::file_io::{load_worksheet, save_worksheet};
//! use metprep_core::worksheet::Worksheet;
//! use std::path::Path;
//!
//! let sheet = Worksheet::new("Batch 17");
//! save_worksheet(&sheet, Path::new("batch17.json"))?;
//! let loaded = load_worksheet(Path::new("batch17.json"))?;
//! assert_eq!(loaded.title, "Batch 17");
//! # Ok::<(), metprep_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::worksheet::{Worksheet, SCHEMA_VERSION};

/// Temp file used by [`save_json`]: `name.json` → `name.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Serialize `value` as pretty JSON and write it atomically.
///
/// 1. Write to a temporary file next to `path`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

pub fn save_worksheet(sheet: &Worksheet, path: &Path) -> CalcResult<()> {
    save_json(sheet, path)
}

/// Load a worksheet, rejecting files from an incompatible schema version
pub fn load_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let sheet: Worksheet = load_json(path)?;
    validate_version(&sheet.version)?;
    Ok(sheet)
}

/// Major versions must match; in 0.x a newer minor is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };

    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);
    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
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
    use crate::calculations::{CalculationItem, SampleBox};
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("metprep_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/a/b.json")), Path::new("/a/b.json.tmp"));
        assert_eq!(tmp_path_for(Path::new("metprep")), Path::new("metprep.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let mut sheet = Worksheet::new("Batch 3");
        sheet.add_item(CalculationItem::MoldCompatibility(SampleBox {
            label: "A".to_string(),
            length_mm: 20.0,
            width_mm: 15.0,
            height_mm: 10.0,
        }));
        save_worksheet(&sheet, &path).unwrap();

        let loaded = load_worksheet(&path).unwrap();
        assert_eq!(loaded.title, "Batch 3");
        assert_eq!(loaded.item_count(), 1);
        assert_eq!(loaded.items[0].label(), "A");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        save_worksheet(&Worksheet::new("x"), &path).unwrap();
        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_worksheet(&temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
