//! Error types for the relief library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when compacting or querying raster data.
#[derive(Error, Debug)]
pub enum ReliefError {
    /// IO error when reading or writing raster files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A window request with a non-positive extent or stride.
    #[error("invalid query: width={width}, height={height}, stride={stride} (width and height must be at least 1, stride at least 1)")]
    InvalidQuery {
        width: usize,
        height: usize,
        stride: usize,
    },

    /// A window origin with no overlap with the raster at all.
    #[error("window origin out of range: x={x}, z={z} (raster is {raster_width}x{raster_height})")]
    OutOfRange {
        x: usize,
        z: usize,
        raster_width: usize,
        raster_height: usize,
    },

    /// The raster file was not found.
    #[error("raster file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File size doesn't match the configured raster dimensions.
    #[error("invalid raster size: {size} bytes (expected {expected} for {width}x{height} samples)")]
    SizeMismatch {
        size: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    /// A dataset manifest that could not be parsed.
    #[cfg(feature = "manifest")]
    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },
}

/// Result type alias using [`ReliefError`].
pub type Result<T> = std::result::Result<T, ReliefError>;
