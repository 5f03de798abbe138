//! Raster file container.
//!
//! Rasters are stored in a headerless single-band format: `width * height`
//! signed 16-bit big-endian samples in row-major order. Dimensions come
//! from dataset configuration and are validated against the file size on
//! open. Reads are served through a memory map, so decoding a region never
//! touches more of the file than the region itself.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::error::{ReliefError, Result};
use crate::grid::SampleGrid;

/// Number of samples along one axis after subsampling with `stride`.
///
/// Offsets `0, stride, 2*stride, ...` are taken while they stay inside the
/// region, yielding `ceil(extent / stride)` samples.
#[inline]
pub(crate) fn subsampled_len(extent: usize, stride: usize) -> usize {
    extent.div_ceil(stride)
}

/// A memory-mapped raster file with fixed, externally supplied dimensions.
pub struct RasterFile {
    data: Mmap,
    width: usize,
    height: usize,
}

impl RasterFile {
    /// Open and memory-map a raster file.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::FileNotFound`] if the file does not exist and
    /// [`ReliefError::SizeMismatch`] if its size is not
    /// `width * height * 2` bytes.
    pub fn open<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReliefError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        // SAFETY: the mapping is read-only and raster files are immutable
        // once written (the marked raster is never mutated again).
        let data = unsafe { Mmap::map(&file)? };

        let expected = width * height * 2;
        if data.len() != expected {
            return Err(ReliefError::SizeMismatch {
                size: data.len(),
                expected,
                width,
                height,
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Raster width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Decode a rectangular region, taking every `stride`-th sample along
    /// each axis starting at offset 0 of the region.
    ///
    /// The region must lie fully inside the raster; callers handle edge
    /// clamping and wraparound stitching.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::OutOfRange`] if the region exceeds the raster
    /// bounds.
    pub fn decode_region(
        &self,
        x: usize,
        z: usize,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<SampleGrid> {
        if x + width > self.width || z + height > self.height {
            return Err(ReliefError::OutOfRange {
                x,
                z,
                raster_width: self.width,
                raster_height: self.height,
            });
        }

        let out_width = subsampled_len(width, stride);
        let out_height = subsampled_len(height, stride);
        let mut samples = Vec::with_capacity(out_width * out_height);
        for row in (0..height).step_by(stride) {
            let row_base = (z + row) * self.width + x;
            for col in (0..width).step_by(stride) {
                samples.push(self.sample_at(row_base + col));
            }
        }

        Ok(SampleGrid::from_samples(samples, out_width, out_height))
    }

    /// Read the big-endian sample at the given flat index.
    #[inline]
    fn sample_at(&self, index: usize) -> i16 {
        let offset = index * 2;
        i16::from_be_bytes([self.data[offset], self.data[offset + 1]])
    }
}

/// Write a whole grid as a new raster file, replacing any existing file.
pub fn encode_full<P: AsRef<Path>>(path: P, grid: &SampleGrid) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for &sample in grid.samples() {
        writer.write_all(&sample.to_be_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_raster(dir: &TempDir, name: &str, grid: &SampleGrid) -> std::path::PathBuf {
        let path = dir.path().join(name);
        encode_full(&path, grid).unwrap();
        path
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let dir = TempDir::new().unwrap();
        let grid = SampleGrid::from_rows(&[&[1, 2, 3], &[4, 5, 6], &[-7, 8, 9]]);
        let path = write_raster(&dir, "round.dem", &grid);

        let raster = RasterFile::open(&path, 3, 3).unwrap();
        let decoded = raster.decode_region(0, 0, 3, 3, 1).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_decode_sub_region() {
        let dir = TempDir::new().unwrap();
        let grid = SampleGrid::from_rows(&[&[1, 2], &[3, 4], &[5, 6]]);
        let path = write_raster(&dir, "sub.dem", &grid);

        let raster = RasterFile::open(&path, 2, 3).unwrap();
        let decoded = raster.decode_region(1, 1, 1, 2, 1).unwrap();
        assert_eq!(decoded.samples(), &[4, 6]);
    }

    #[test]
    fn test_decode_with_stride() {
        let dir = TempDir::new().unwrap();
        let grid = SampleGrid::from_rows(&[&[1, 2], &[3, 4], &[5, 6]]);
        let path = write_raster(&dir, "stride.dem", &grid);

        let raster = RasterFile::open(&path, 2, 3).unwrap();
        // stride 2 over a 2x3 region: columns {0}, rows {0, 2}
        let decoded = raster.decode_region(0, 0, 2, 3, 2).unwrap();
        assert_eq!(decoded.width(), 1);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.samples(), &[1, 5]);
    }

    #[test]
    fn test_region_out_of_bounds() {
        let dir = TempDir::new().unwrap();
        let grid = SampleGrid::new(4, 4);
        let path = write_raster(&dir, "oob.dem", &grid);

        let raster = RasterFile::open(&path, 4, 4).unwrap();
        assert!(matches!(
            raster.decode_region(2, 0, 3, 4, 1),
            Err(ReliefError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = RasterFile::open(dir.path().join("absent.dem"), 2, 2);
        assert!(matches!(result, Err(ReliefError::FileNotFound { .. })));
    }

    #[test]
    fn test_size_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.dem");
        std::fs::write(&path, [0u8; 6]).unwrap();

        let result = RasterFile::open(&path, 2, 2);
        if let Err(ReliefError::SizeMismatch { size, expected, .. }) = result {
            assert_eq!(size, 6);
            assert_eq!(expected, 8);
        } else {
            panic!("expected SizeMismatch error");
        }
    }

    #[test]
    fn test_subsampled_len() {
        assert_eq!(subsampled_len(10, 1), 10);
        assert_eq!(subsampled_len(10, 3), 4);
        assert_eq!(subsampled_len(9, 3), 3);
        assert_eq!(subsampled_len(1, 5), 1);
    }
}
