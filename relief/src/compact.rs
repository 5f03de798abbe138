//! Redundancy discovery and marking.
//!
//! A "patch" is an axis-aligned rectangle in which every row steps by a
//! constant difference (the step of the patch's first row) and every column
//! steps by a constant difference (the step of the patch's first column).
//! Such a region is linearly predictable: a client can reconstruct its
//! interior from the border alone. [`find_redundancies`] scans a grid for
//! maximal patches and overwrites their strictly interior samples with a
//! sentinel, leaving the full perimeter intact.
//!
//! The scan is a pure in-memory pass with no I/O. It is deterministic for
//! a given grid: origins are visited in row-major order and accepted
//! patches claim their cells in a visited mask, so no two patches overlap.

use crate::grid::SampleGrid;

/// Smallest patch dimension worth marking. Anything narrower has no
/// interior once the perimeter is preserved.
pub const MIN_KERNEL: usize = 3;

/// Row-band height used by the compaction gate for rasters too tall to
/// scan in one piece.
pub const DEFAULT_CHUNK_ROWS: usize = 8192;

/// A candidate patch extent, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    width: usize,
    height: usize,
}

impl Span {
    fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Cells already claimed by an accepted patch.
///
/// One bit per grid cell over the same flat row-major layout as the grid
/// buffer; written only when a patch is accepted.
struct VisitedMask {
    bits: Vec<u64>,
    width: usize,
}

impl VisitedMask {
    fn new(width: usize, height: usize) -> Self {
        Self {
            bits: vec![0; (width * height).div_ceil(64)],
            width,
        }
    }

    #[inline]
    fn get(&self, x: usize, z: usize) -> bool {
        let index = z * self.width + x;
        self.bits[index / 64] & (1 << (index % 64)) != 0
    }

    #[inline]
    fn set(&mut self, x: usize, z: usize) {
        let index = z * self.width + x;
        self.bits[index / 64] |= 1 << (index % 64);
    }
}

/// Scan `grid` for linear patches and overwrite their interiors with
/// `sentinel`, in place.
///
/// With `chunk_rows = Some(n)` the grid is partitioned into independent
/// horizontal bands of `n` rows and each band is scanned separately;
/// patches never cross a band boundary. This bounds per-band scan work on
/// very large grids at the cost of missing redundancy that straddles band
/// edges — an accepted trade-off.
///
/// Grids with fewer than [`MIN_KERNEL`] rows or columns are left untouched.
pub fn find_redundancies(grid: &mut SampleGrid, sentinel: i16, chunk_rows: Option<usize>) {
    let height = grid.height();
    if grid.width() < MIN_KERNEL || height < MIN_KERNEL {
        return;
    }

    let band_rows = match chunk_rows {
        Some(rows) if rows > 0 => rows,
        _ => height,
    };

    let mut visited = VisitedMask::new(grid.width(), height);
    let mut band_start = 0;
    while band_start < height {
        let band_end = (band_start + band_rows).min(height);
        scan_band(grid, sentinel, &mut visited, band_start, band_end);
        band_start = band_end;
    }
}

/// Scan one horizontal band for patches. Probes never read past `z_end`.
fn scan_band(
    grid: &mut SampleGrid,
    sentinel: i16,
    visited: &mut VisitedMask,
    z_start: usize,
    z_end: usize,
) {
    if z_end - z_start < MIN_KERNEL {
        return;
    }
    for z in z_start..=z_end - MIN_KERNEL {
        for x in 0..=grid.width() - MIN_KERNEL {
            if !visited.get(x, z) {
                mark_patch_at(grid, sentinel, visited, x, z, z_end);
            }
        }
    }
}

/// Probe both axes from origin `(x, z)` and, if the best joint patch meets
/// the minimum kernel size, claim it and fill its interior.
fn mark_patch_at(
    grid: &mut SampleGrid,
    sentinel: i16,
    visited: &mut VisitedMask,
    x: usize,
    z: usize,
    z_end: usize,
) {
    let rows = probe_rows(grid, x, z, z_end);
    let columns = probe_columns(grid, x, z, z_end);
    let patch = best_span(&rows, &columns);
    if patch.width < MIN_KERNEL || patch.height < MIN_KERNEL {
        // The origin stays unvisited; a differently placed patch may still
        // claim it later.
        return;
    }

    for dz in 0..patch.height {
        for dx in 0..patch.width {
            if dz > 0 && dz < patch.height - 1 && dx > 0 && dx < patch.width - 1 {
                grid.set(x + dx, z + dz, sentinel);
            }
            visited.set(x + dx, z + dz);
        }
    }
}

/// Horizontal probe: fix the step of the origin's row and grow the patch
/// downward one row at a time.
///
/// Each row contributes its longest run of columns whose consecutive
/// differences equal the origin row's step, capped at the current plateau
/// width. A new candidate is recorded every time the achievable width
/// narrows; growth stops once a row's run falls below [`MIN_KERNEL`]. The
/// result is a staircase of (decreasing width, increasing height)
/// candidates.
fn probe_rows(grid: &SampleGrid, x0: usize, z0: usize, z_end: usize) -> Vec<Span> {
    let raster_width = grid.width();
    let step = grid.get(x0, z0) as i32 - grid.get(x0 + 1, z0) as i32;

    let mut spans = Vec::new();
    let mut width = 0;
    let mut height = 0;
    for z in z0..z_end {
        let mut run = 2;
        while x0 + run < raster_width
            && (width == 0 || run < width)
            && grid.get(x0 + run - 1, z) as i32 - grid.get(x0 + run, z) as i32 == step
        {
            run += 1;
        }
        if run < MIN_KERNEL {
            break;
        }
        if width == 0 {
            width = run;
        } else if run < width {
            spans.push(Span { width, height });
            width = run;
        }
        height += 1;
    }
    if height > 0 {
        spans.push(Span { width, height });
    }
    spans
}

/// Vertical probe, symmetric to [`probe_rows`]: fix the step of the
/// origin's column and grow the patch rightward one column at a time.
fn probe_columns(grid: &SampleGrid, x0: usize, z0: usize, z_end: usize) -> Vec<Span> {
    let step = grid.get(x0, z0) as i32 - grid.get(x0, z0 + 1) as i32;

    let mut spans = Vec::new();
    let mut width = 0;
    let mut height = 0;
    for x in x0..grid.width() {
        let mut run = 2;
        while z0 + run < z_end
            && (height == 0 || run < height)
            && grid.get(x, z0 + run - 1) as i32 - grid.get(x, z0 + run) as i32 == step
        {
            run += 1;
        }
        if run < MIN_KERNEL {
            break;
        }
        if height == 0 {
            height = run;
        } else if run < height {
            spans.push(Span { width, height });
            height = run;
        }
        width += 1;
    }
    if width > 0 {
        spans.push(Span { width, height });
    }
    spans
}

/// Combine the two staircases: the patch jointly achievable by a row
/// candidate and a column candidate is the pairwise minimum of their
/// extents. The first pair reaching the maximal area wins.
fn best_span(rows: &[Span], columns: &[Span]) -> Span {
    let mut best = Span {
        width: 0,
        height: 0,
    };
    for row in rows {
        for column in columns {
            let joint = Span {
                width: row.width.min(column.width),
                height: row.height.min(column.height),
            };
            if joint.area() > best.area() {
                best = joint;
            }
        }
    }
    best
}
