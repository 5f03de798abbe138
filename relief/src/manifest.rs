//! Dataset manifest loading (requires the `manifest` feature).
//!
//! A manifest is a JSON array of dataset entries:
//!
//! ```json
//! [
//!   {
//!     "name": "mola",
//!     "body": "Mars",
//!     "original": "mola.dem",
//!     "marked": "mola_marked.dem",
//!     "width": 46080,
//!     "height": 23040
//!   }
//! ]
//! ```
//!
//! Relative raster paths are resolved against the manifest's directory, so
//! a data directory can be relocated as a unit.

use std::path::Path;

use crate::dataset::DatasetConfig;
use crate::error::{ReliefError, Result};

/// Default manifest filename inside a data directory.
pub const MANIFEST_FILENAME: &str = "datasets.json";

/// Load dataset configurations from a manifest file.
///
/// # Errors
///
/// Returns [`ReliefError::FileNotFound`] if the manifest does not exist
/// and [`ReliefError::InvalidManifest`] if it cannot be parsed.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<DatasetConfig>> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReliefError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut configs: Vec<DatasetConfig> =
        serde_json::from_str(&contents).map_err(|e| ReliefError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for config in &mut configs {
        if config.original.is_relative() {
            config.original = base.join(&config.original);
        }
        if config.marked.is_relative() {
            config.marked = base.join(&config.marked);
        }
    }

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(
            &path,
            r#"[
                {
                    "name": "mola",
                    "body": "Mars",
                    "original": "mola.dem",
                    "marked": "mola_marked.dem",
                    "width": 8,
                    "height": 4
                },
                {
                    "name": "lola",
                    "body": "Moon",
                    "original": "/data/lola.dem",
                    "marked": "/data/lola_marked.dem",
                    "width": 16,
                    "height": 8,
                    "chunk_rows": 4
                }
            ]"#,
        )
        .unwrap();

        let configs = load_manifest(&path).unwrap();
        assert_eq!(configs.len(), 2);

        assert_eq!(configs[0].name, "mola");
        assert_eq!(configs[0].body, "Mars");
        assert_eq!(configs[0].original, dir.path().join("mola.dem"));
        assert_eq!(configs[0].chunk_rows, None);

        // Absolute paths are kept as-is.
        assert_eq!(configs[1].original, Path::new("/data/lola.dem"));
        assert_eq!(configs[1].chunk_rows, Some(4));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let result = load_manifest(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ReliefError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(&path, "not json").unwrap();

        let result = load_manifest(&path);
        assert!(matches!(result, Err(ReliefError::InvalidManifest { .. })));
    }
}
