//! Dataset lifecycle: compact once, serve forever.
//!
//! A [`Dataset`] ties one original raster file to its derived, compacted
//! ("marked") raster. [`Dataset::ensure_ready`] is the compaction gate: the
//! first use of a dataset materializes the whole original in memory, runs
//! the redundancy compactor and writes the marked raster; every later call
//! sees the marked file on disk and does nothing. All serving reads go
//! through the marked raster, never the original.

use std::path::PathBuf;

use crate::codec::{self, RasterFile};
use crate::compact::{find_redundancies, DEFAULT_CHUNK_ROWS};
use crate::error::Result;
use crate::grid::{SampleGrid, SENTINEL};
use crate::window::{read_window, WindowRequest};

/// Configuration for one dataset. Body-specific behavior is data, not
/// code: one `DatasetConfig` per celestial body.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
pub struct DatasetConfig {
    /// Route key, e.g. `"mola"`.
    pub name: String,
    /// Display name of the celestial body, e.g. `"Mars"`.
    pub body: String,
    /// Path of the immutable source raster.
    pub original: PathBuf,
    /// Path of the derived, compacted raster.
    pub marked: PathBuf,
    /// Raster width in samples.
    pub width: usize,
    /// Raster height in samples.
    pub height: usize,
    /// Row-band height for chunked compaction. `None` picks a default
    /// based on the raster height.
    #[cfg_attr(feature = "manifest", serde(default))]
    pub chunk_rows: Option<usize>,
}

/// A configured dataset: the compaction gate plus the windowed read path.
pub struct Dataset {
    config: DatasetConfig,
}

impl Dataset {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Whether the dataset's source raster exists on disk.
    ///
    /// This is the "available datasets" probe; it says nothing about
    /// whether compaction has run yet.
    pub fn is_available(&self) -> bool {
        self.config.original.exists()
    }

    /// Ensure the marked raster exists, compacting the original if needed.
    ///
    /// If the marked file already exists this does nothing — even if the
    /// original has changed since; presence is the sole completion marker
    /// and staleness is accepted, not detected. Otherwise the entire
    /// original is decoded into memory, the compactor runs (chunked into
    /// row-bands when the raster is tall enough to warrant it) and the
    /// mutated grid is encoded to the marked path. Synchronous and
    /// potentially long-running; an I/O error here aborts dataset startup.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.config.marked.exists() {
            return Ok(());
        }
        let raster = RasterFile::open(&self.config.original, self.config.width, self.config.height)?;
        let mut grid = raster.decode_region(0, 0, self.config.width, self.config.height, 1)?;
        drop(raster);
        find_redundancies(&mut grid, SENTINEL, self.effective_chunk_rows());
        codec::encode_full(&self.config.marked, &grid)?;
        Ok(())
    }

    /// Serve a window from the marked raster.
    ///
    /// Stateless: every call opens the file freshly; the marked raster is
    /// immutable once written, so concurrent reads need no coordination.
    pub fn read_window(&self, request: &WindowRequest) -> Result<SampleGrid> {
        read_window(
            &self.config.marked,
            self.config.width,
            self.config.height,
            request,
        )
    }

    /// Configured row-band height, or the default when the raster is tall
    /// enough for banding to matter.
    fn effective_chunk_rows(&self) -> Option<usize> {
        match self.config.chunk_rows {
            Some(rows) => Some(rows),
            None if self.config.height > DEFAULT_CHUNK_ROWS => Some(DEFAULT_CHUNK_ROWS),
            None => None,
        }
    }
}
