use anyhow::Result;
use relief::codec::RasterFile;
use relief::SENTINEL;
use std::path::Path;

pub fn run(manifest: &Path, name: &str) -> Result<()> {
    let config = super::find_config(manifest, name)?;

    println!("Dataset: {}", config.name);
    println!("Body: {}", config.body);
    println!(
        "Dimensions: {}x{} samples ({} total)",
        config.width,
        config.height,
        config.width * config.height
    );
    if let Some(chunk_rows) = config.chunk_rows {
        println!("Chunk rows: {}", chunk_rows);
    }
    println!();

    print_file_line("Source raster", &config.original);
    print_file_line("Marked raster", &config.marked);

    // Scan the marked raster for sentinel density and elevation range.
    if config.marked.exists() {
        let raster = RasterFile::open(&config.marked, config.width, config.height)?;
        let grid = raster.decode_region(0, 0, config.width, config.height, 1)?;

        let mut marked_count = 0u64;
        let (mut min_elev, mut max_elev) = (i16::MAX, i16::MIN);
        for &sample in grid.samples() {
            if sample == SENTINEL {
                marked_count += 1;
            } else {
                min_elev = min_elev.min(sample);
                max_elev = max_elev.max(sample);
            }
        }

        println!();
        if min_elev <= max_elev {
            println!("Min elevation: {}m", min_elev);
            println!("Max elevation: {}m", max_elev);
        }
        let total = (config.width * config.height) as u64;
        let marked_pct = (marked_count as f64 / total as f64) * 100.0;
        println!("Marked samples: {} ({:.1}%)", marked_count, marked_pct);
    }

    Ok(())
}

fn print_file_line(label: &str, path: &Path) {
    match std::fs::metadata(path) {
        Ok(meta) => println!(
            "{}: {} ({})",
            label,
            path.display(),
            super::format_size(meta.len())
        ),
        Err(_) => println!("{}: {} (missing)", label, path.display()),
    }
}
