use anyhow::Result;
use std::path::Path;

pub fn run(manifest: &Path) -> Result<()> {
    let configs = super::load_configs(manifest)?;

    if configs.is_empty() {
        println!("No datasets in manifest: {}", manifest.display());
        return Ok(());
    }

    let mut available = 0;
    let mut compacted = 0;
    let mut total_size: u64 = 0;

    println!(
        "{:<12} {:<12} {:>14} {:>10} {:>10}",
        "DATASET", "BODY", "DIMENSIONS", "SOURCE", "MARKED"
    );
    println!("{}", "-".repeat(62));

    for config in &configs {
        let has_original = config.original.exists();
        let has_marked = config.marked.exists();
        if has_original {
            available += 1;
            if let Ok(meta) = std::fs::metadata(&config.original) {
                total_size += meta.len();
            }
        }
        if has_marked {
            compacted += 1;
            if let Ok(meta) = std::fs::metadata(&config.marked) {
                total_size += meta.len();
            }
        }

        println!(
            "{:<12} {:<12} {:>14} {:>10} {:>10}",
            config.name,
            config.body,
            format!("{}x{}", config.width, config.height),
            if has_original { "present" } else { "missing" },
            if has_marked { "ready" } else { "pending" },
        );
    }

    println!();
    println!("Summary:");
    println!("  Total datasets: {}", configs.len());
    println!("  Available: {}", available);
    println!("  Compacted: {}", compacted);
    println!("  Total size: {}", super::format_size(total_size));
    println!("  Manifest: {}", manifest.display());

    Ok(())
}
