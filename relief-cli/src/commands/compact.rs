use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use relief::Dataset;
use std::path::Path;
use std::time::Duration;

pub fn run(manifest: &Path, dataset: Option<String>, force: bool) -> Result<()> {
    let configs = match dataset {
        Some(name) => vec![super::find_config(manifest, &name)?],
        None => super::load_configs(manifest)?,
    };

    for config in configs {
        let name = config.name.clone();
        let dataset = Dataset::new(config);

        if !dataset.is_available() {
            println!(
                "{}: skipped (source raster missing: {})",
                name,
                dataset.config().original.display()
            );
            continue;
        }

        if force && dataset.config().marked.exists() {
            std::fs::remove_file(&dataset.config().marked)
                .with_context(|| format!("Failed to remove {}", dataset.config().marked.display()))?;
        }

        if dataset.config().marked.exists() {
            println!("{}: already compacted", name);
            continue;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.set_message(format!(
            "Compacting {} ({}x{})",
            name,
            dataset.config().width,
            dataset.config().height
        ));
        pb.enable_steady_tick(Duration::from_millis(100));

        dataset
            .ensure_ready()
            .with_context(|| format!("Compaction failed for {}", name))?;

        pb.finish_with_message(format!(
            "{}: wrote {}",
            name,
            dataset.config().marked.display()
        ));
    }

    Ok(())
}
