//! In-memory sample grids.
//!
//! [`SampleGrid`] is the unit every other module works in: a row-major,
//! contiguous buffer of signed 16-bit elevation samples with a fixed width
//! and height. `z` indexes rows, `x` indexes columns (the axis that wraps
//! at the 360° longitude seam on a global mosaic).

/// Reserved sample value marking the interior of a compacted patch.
///
/// A client reconstructs these samples by interpolating from the patch
/// border. Real elevation data is assumed to never take this exact value;
/// this is not verified at runtime.
pub const SENTINEL: i16 = i16::MIN;

/// A row-major grid of elevation samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    samples: Vec<i16>,
    width: usize,
    height: usize,
}

impl SampleGrid {
    /// Create a zero-filled grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            samples: vec![0; width * height],
            width,
            height,
        }
    }

    /// Wrap an existing flat sample buffer.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height`.
    pub fn from_samples(samples: Vec<i16>, width: usize, height: usize) -> Self {
        assert_eq!(
            samples.len(),
            width * height,
            "sample buffer does not match {}x{}",
            width,
            height
        );
        Self {
            samples,
            width,
            height,
        }
    }

    /// Build a grid from row slices. Intended for tests and small fixtures.
    ///
    /// # Panics
    ///
    /// Panics if the rows have uneven lengths.
    pub fn from_rows(rows: &[&[i16]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut samples = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "uneven row lengths");
            samples.extend_from_slice(row);
        }
        Self {
            samples,
            width,
            height,
        }
    }

    /// Grid width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `z`.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> i16 {
        self.samples[z * self.width + x]
    }

    /// Overwrite the sample at column `x`, row `z`.
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: i16) {
        self.samples[z * self.width + x] = value;
    }

    /// Row `z` as a slice.
    pub fn row(&self, z: usize) -> &[i16] {
        &self.samples[z * self.width..(z + 1) * self.width]
    }

    /// The flat row-major sample buffer.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the grid, returning the flat sample buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Append the columns of `other` to the right of this grid.
    ///
    /// Used to stitch wrapped columns onto a windowed read.
    ///
    /// # Panics
    ///
    /// Panics if the two grids have different heights.
    pub fn append_columns(&mut self, other: &SampleGrid) {
        assert_eq!(self.height, other.height, "column stitch height mismatch");
        let new_width = self.width + other.width;
        let mut samples = Vec::with_capacity(new_width * self.height);
        for z in 0..self.height {
            samples.extend_from_slice(self.row(z));
            samples.extend_from_slice(other.row(z));
        }
        self.samples = samples;
        self.width = new_width;
    }

    /// Append the rows of `other` below this grid.
    ///
    /// # Panics
    ///
    /// Panics if the two grids have different widths.
    pub fn append_rows(&mut self, other: &SampleGrid) {
        assert_eq!(self.width, other.width, "row stitch width mismatch");
        self.samples.extend_from_slice(&other.samples);
        self.height += other.height;
    }
}
