use anyhow::{bail, Context, Result};
use relief::{Dataset, WindowRequest};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct WindowResponse<'a> {
    dataset: &'a str,
    x: usize,
    z: usize,
    width: usize,
    height: usize,
    stride: usize,
    columns: usize,
    rows: usize,
    samples: &'a [i16],
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    manifest: &Path,
    name: &str,
    x: usize,
    z: usize,
    width: usize,
    height: usize,
    stride: usize,
    json: bool,
) -> Result<()> {
    let config = super::find_config(manifest, name)?;
    let dataset = Dataset::new(config);

    if !dataset.config().marked.exists() {
        bail!(
            "Dataset {} is not compacted yet, run `relief compact {}` first",
            name,
            name
        );
    }

    let request = WindowRequest::new(x, z, width, height).with_stride(stride);
    let grid = dataset
        .read_window(&request)
        .with_context(|| format!("Window read failed for {}", name))?;

    if json {
        let response = WindowResponse {
            dataset: name,
            x,
            z,
            width,
            height,
            stride,
            columns: grid.width(),
            rows: grid.height(),
            samples: grid.samples(),
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        let rendered: Vec<String> = grid.samples().iter().map(|s| s.to_string()).collect();
        println!("[{}]", rendered.join(", "));
    }

    Ok(())
}
