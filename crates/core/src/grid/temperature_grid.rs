//! Bounded-integer temperature field on a rectangular 4-neighbor lattice

use crate::error::ConfigError;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// Coldest representable cell value
pub const TEMP_MIN: u8 = 0;

/// Hottest representable cell value
pub const TEMP_MAX: u8 = 100;

/// Clamp a signed temperature into `[TEMP_MIN, TEMP_MAX]`
#[inline]
pub fn clamp_temp(value: i32) -> u8 {
    value.clamp(i32::from(TEMP_MIN), i32::from(TEMP_MAX)) as u8
}

/// Round a continuous temperature and clamp it into `[TEMP_MIN, TEMP_MAX]`
///
/// Uses `f32::round`, which rounds half away from zero. Both solvers publish
/// through this function so the rounding convention is fixed in one place.
#[inline]
pub fn round_temp(value: f32) -> u8 {
    clamp_temp(value.round() as i32)
}

/// Summary of the field for logging and overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStats {
    /// Coldest cell
    pub min: u8,
    /// Hottest cell
    pub max: u8,
    /// Mean cell value
    pub mean: f32,
    /// Sum over all cells
    pub total: u64,
}

/// Row-major temperature grid (`y * width + x`)
///
/// Every cell always holds an integer in `[TEMP_MIN, TEMP_MAX]`. Dimensions are
/// at least 1x1 and only change through [`TemperatureGrid::resize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl TemperatureGrid {
    /// Create a grid filled with `initial` (clamped)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize, initial: i32) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![clamp_temp(initial); width * height],
        })
    }

    /// Build a grid from existing cell values, clamping each one
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimensions`] if either dimension is zero or
    /// `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: &[i32]) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        if values.len() != width * height {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: values.iter().map(|&v| clamp_temp(v)).collect(),
        })
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`, or `None` when out of bounds
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Read-only view of the field, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Direct write access for solvers
    ///
    /// Writers must keep every value in `[TEMP_MIN, TEMP_MAX]`.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Temperature at `(x, y)`
    pub fn get_temp(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set `(x, y)` to `value` clamped into `[TEMP_MIN, TEMP_MAX]`
    ///
    /// Returns `false` (and changes nothing) when the coordinates are out of bounds.
    pub fn set_temp(&mut self, x: usize, y: usize, value: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = clamp_temp(value);
                true
            }
            None => false,
        }
    }

    /// Set every cell to `value` (clamped)
    pub fn fill(&mut self, value: i32) {
        self.cells.fill(clamp_temp(value));
    }

    /// Replace every cell with a uniformly random temperature
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.random_range(TEMP_MIN..=TEMP_MAX);
        }
        debug!("Randomized {}x{} grid", self.width, self.height);
    }

    /// Paint a filled disc of `value` centred on `(cx, cy)`
    ///
    /// The centre may lie off-grid; only in-bounds cells are written.
    /// Returns the number of cells painted.
    pub fn paint_disc(&mut self, cx: i64, cy: i64, radius: u32, value: i32) -> usize {
        let value = clamp_temp(value);
        let r = i64::from(radius);
        let r_sq = r * r;
        let mut painted = 0;

        let y_lo = (cy - r).max(0);
        let y_hi = (cy + r).min(self.height as i64 - 1);
        let x_lo = (cx - r).max(0);
        let x_hi = (cx + r).min(self.width as i64 - 1);

        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r_sq {
                    self.cells[y as usize * self.width + x as usize] = value;
                    painted += 1;
                }
            }
        }

        if painted == 0 {
            warn!(
                "Paint at ({}, {}) radius {} missed the {}x{} grid",
                cx, cy, radius, self.width, self.height
            );
        }
        painted
    }

    /// Change the grid dimensions
    ///
    /// Cells inside both the old and new bounds keep their values; new cells
    /// take `fill` (clamped).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimensions`] if either dimension is zero.
    /// The grid is unchanged on error.
    pub fn resize(&mut self, width: usize, height: usize, fill: i32) -> Result<(), ConfigError> {
        check_dimensions(width, height)?;
        if (width, height) == self.dimensions() {
            return Ok(());
        }

        let mut cells = vec![clamp_temp(fill); width * height];
        let keep_w = width.min(self.width);
        for y in 0..height.min(self.height) {
            let src = y * self.width;
            let dst = y * width;
            cells[dst..dst + keep_w].copy_from_slice(&self.cells[src..src + keep_w]);
        }

        debug!(
            "Resized grid {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.cells = cells;
        Ok(())
    }

    /// Min, max, mean and total over all cells
    pub fn stats(&self) -> GridStats {
        let mut min = TEMP_MAX;
        let mut max = TEMP_MIN;
        let mut total = 0_u64;
        for &v in &self.cells {
            min = min.min(v);
            max = max.max(v);
            total += u64::from(v);
        }
        GridStats {
            min,
            max,
            mean: total as f32 / self.cells.len() as f32,
            total,
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    Ok(())
}
