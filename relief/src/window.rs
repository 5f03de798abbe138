//! Windowed, wraparound-aware raster reads.
//!
//! A window is an arbitrary rectangle in raster-sample coordinates plus a
//! subsampling stride. Windows may overflow the raster's right edge (the
//! longitude seam of a global mosaic — the overflow is re-read from column
//! 0 and stitched on as extra columns) and its bottom edge (re-read from
//! the raster's trailing rows and stitched on as extra rows; a cosmetic
//! continuation, not a physically meaningful polar wrap).

use std::path::Path;

use crate::codec::RasterFile;
use crate::error::{ReliefError, Result};
use crate::grid::SampleGrid;

/// A windowed read request, in raster-sample coordinates.
///
/// `width` and `height` are the extent before subsampling; `stride`
/// selects every stride-th sample along each axis starting at offset 0 of
/// the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRequest {
    pub x: usize,
    pub z: usize,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

impl WindowRequest {
    /// A full-detail request with stride 1.
    pub fn new(x: usize, z: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            z,
            width,
            height,
            stride: 1,
        }
    }

    /// Set the subsampling stride.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Reject degenerate extents before any I/O happens.
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.stride == 0 {
            return Err(ReliefError::InvalidQuery {
                width: self.width,
                height: self.height,
                stride: self.stride,
            });
        }
        Ok(())
    }
}

/// Read a window from the raster at `path`, stitching across edges.
///
/// The base region is clamped to the raster's extent and subsampled in
/// place. If the window overflows the right edge, the overflow amount is
/// re-read starting at column 0 of the same rows and appended as extra
/// columns; if it overflows the bottom edge, the overflow amount is read
/// from the raster's trailing rows and appended as extra rows (with the
/// south-east corner re-read from the trailing rows at column 0 when both
/// edges overflow, so the result stays rectangular).
///
/// Overflow amounts are computed in raw raster-sample units and the
/// overflow regions are decoded with the same stride as the base region,
/// so with stride 1 the result has exactly `width` columns and `height`
/// rows; with a larger stride the base and overflow parts round up
/// independently.
///
/// # Errors
///
/// - [`ReliefError::InvalidQuery`] for a zero width, height or stride.
/// - [`ReliefError::OutOfRange`] when the origin lies entirely outside the
///   raster.
/// - [`ReliefError::FileNotFound`] / [`ReliefError::SizeMismatch`] /
///   [`ReliefError::Io`] when the raster cannot be decoded; never retried.
pub fn read_window<P: AsRef<Path>>(
    path: P,
    raster_width: usize,
    raster_height: usize,
    request: &WindowRequest,
) -> Result<SampleGrid> {
    request.validate()?;
    if request.x >= raster_width || request.z >= raster_height {
        return Err(ReliefError::OutOfRange {
            x: request.x,
            z: request.z,
            raster_width,
            raster_height,
        });
    }

    let raster = RasterFile::open(path, raster_width, raster_height)?;
    let stride = request.stride;

    let base_width = request.width.min(raster_width - request.x);
    let base_height = request.height.min(raster_height - request.z);
    let mut window = raster.decode_region(request.x, request.z, base_width, base_height, stride)?;

    // At most one full wrap is stitched; anything beyond is clamped.
    let x_overflow = (request.x + request.width)
        .saturating_sub(raster_width)
        .min(raster_width);
    let z_overflow = (request.z + request.height)
        .saturating_sub(raster_height)
        .min(raster_height);

    if x_overflow > 0 {
        let east = raster.decode_region(0, request.z, x_overflow, base_height, stride)?;
        window.append_columns(&east);
    }

    if z_overflow > 0 {
        let trailing = raster_height - z_overflow;
        let mut south = raster.decode_region(request.x, trailing, base_width, z_overflow, stride)?;
        if x_overflow > 0 {
            let corner = raster.decode_region(0, trailing, x_overflow, z_overflow, stride)?;
            south.append_columns(&corner);
        }
        window.append_rows(&south);
    }

    Ok(window)
}
