//! # Relief — windowed queries over planetary elevation mosaics
//!
//! Library for serving rectangular windows of very large single-band
//! elevation rasters (global digital-elevation-model mosaics, tens of
//! thousands of samples per axis) to a terrain-rendering client.
//!
//! ## How it works
//!
//! - **Compaction**: a one-time preprocessing pass scans the raster for
//!   axis-aligned regions of linearly predictable elevation ("patches")
//!   and replaces their interiors with a sentinel value. The client
//!   reconstructs full detail by interpolating from each patch border, so
//!   far fewer meaningful samples need to be shipped.
//! - **Windowed reads**: arbitrary rectangular windows with subsampling,
//!   stitched across the raster's edges so a global wrap-around map
//!   presents as a continuous surface while panning.
//! - **The gate**: on first use of a dataset the compacted ("marked")
//!   raster is produced exactly once; all subsequent reads are small
//!   memory-mapped decodes of the marked file.
//!
//! ## Quick start
//!
//! ```ignore
//! use relief::{Dataset, DatasetConfig, WindowRequest};
//!
//! let dataset = Dataset::new(DatasetConfig {
//!     name: "mola".into(),
//!     body: "Mars".into(),
//!     original: "data/mola.dem".into(),
//!     marked: "data/mola_marked.dem".into(),
//!     width: 46080,
//!     height: 23040,
//!     chunk_rows: None,
//! });
//!
//! dataset.ensure_ready()?; // compacts on first use only
//! let window = dataset.read_window(&WindowRequest::new(1024, 512, 256, 256).with_stride(4))?;
//! println!("{} samples", window.samples().len());
//! ```
//!
//! ## Raster format
//!
//! Rasters are headerless single-band files of signed 16-bit big-endian
//! samples in row-major order; dimensions come from dataset
//! configuration. The sentinel value -32768 marks compacted patch
//! interiors and is assumed never to occur in real elevation data.

pub mod codec;
pub mod compact;
pub mod dataset;
pub mod error;
pub mod grid;
#[cfg(feature = "manifest")]
pub mod manifest;
pub mod window;

// Re-export main types at crate root for convenience
pub use dataset::{Dataset, DatasetConfig};
pub use error::{ReliefError, Result};
pub use grid::{SampleGrid, SENTINEL};
pub use window::{read_window, WindowRequest};
