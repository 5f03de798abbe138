use anyhow::{bail, Context, Result};
use relief::manifest::{load_manifest, MANIFEST_FILENAME};
use relief::DatasetConfig;
use std::path::{Path, PathBuf};

pub mod compact;
pub mod info;
pub mod list;
pub mod window;

/// Resolve the manifest path from the command-line options.
pub fn manifest_path(manifest: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match (manifest, data_dir) {
        (Some(path), _) => Ok(path),
        (None, Some(dir)) => Ok(dir.join(MANIFEST_FILENAME)),
        (None, None) => bail!(
            "No manifest configured. Use --manifest/--data-dir or set \
             RELIEF_MANIFEST/RELIEF_DATA_DIR"
        ),
    }
}

/// Load the manifest and return all configured datasets.
pub fn load_configs(manifest: &Path) -> Result<Vec<DatasetConfig>> {
    load_manifest(manifest)
        .with_context(|| format!("Failed to load manifest: {}", manifest.display()))
}

/// Load the manifest and return the named dataset.
pub fn find_config(manifest: &Path, name: &str) -> Result<DatasetConfig> {
    let configs = load_configs(manifest)?;
    configs
        .into_iter()
        .find(|c| c.name == name)
        .with_context(|| format!("Dataset not found in manifest: {}", name))
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
