//! Compact a small synthetic raster and read windows back from it.
//!
//! Run with: `cargo run --example basic`

use relief::codec::encode_full;
use relief::{Dataset, DatasetConfig, SampleGrid, WindowRequest, SENTINEL};

fn main() -> relief::Result<()> {
    let dir = std::env::temp_dir().join("relief-basic");
    std::fs::create_dir_all(&dir)?;

    // A 16x8 raster: a linear east-west gradient, i.e. one big patch.
    let mut grid = SampleGrid::new(16, 8);
    for z in 0..8 {
        for x in 0..16 {
            grid.set(x, z, (x * 10) as i16);
        }
    }
    let original = dir.join("demo.dem");
    encode_full(&original, &grid)?;

    let dataset = Dataset::new(DatasetConfig {
        name: "demo".into(),
        body: "Demo".into(),
        original,
        marked: dir.join("demo_marked.dem"),
        width: 16,
        height: 8,
        chunk_rows: None,
    });

    // First call compacts; later calls find the marked raster on disk.
    dataset.ensure_ready()?;

    let window = dataset.read_window(&WindowRequest::new(0, 0, 16, 8))?;
    let marked = window.samples().iter().filter(|&&s| s == SENTINEL).count();
    println!(
        "marked raster: {}x{}, {} of {} samples replaced by the sentinel",
        window.width(),
        window.height(),
        marked,
        window.samples().len()
    );

    // A subsampled window wrapping across the longitude seam.
    let wrapped = dataset.read_window(&WindowRequest::new(12, 0, 8, 4).with_stride(2))?;
    println!(
        "wrapped window ({}x{}): {:?}",
        wrapped.width(),
        wrapped.height(),
        wrapped.samples()
    );

    Ok(())
}
