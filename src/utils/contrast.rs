//! Linear contrast stretch into the 8-bit range
//!
//! The observed minimum maps to 0 and the observed maximum to 255. A flat
//! input has no range to stretch and becomes all zeros.

use crate::models::Grid;

/// Sample types the stretch accepts
pub trait Sample: Copy + Send + Sync {
    /// Widen the sample for arithmetic
    fn to_f64(self) -> f64;
}

impl Sample for u8 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Minimum and maximum sample, or `None` for an empty grid
pub fn min_max<T: Sample>(grid: &Grid<T>) -> Option<(f64, f64)> {
    let mut iter = grid.as_slice().iter().map(|&v| v.to_f64());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Rescale `grid` so its minimum becomes 0 and its maximum 255
pub fn normalize_to_u8<T: Sample>(grid: &Grid<T>) -> Grid<u8> {
    match min_max(grid) {
        Some((lo, hi)) => rescale(grid, lo, hi),
        None => Grid::new(grid.width(), grid.height()),
    }
}

/// Rescale `grid` from the declared `[lo, hi]` range into `[0, 255]`
///
/// Values are rounded to the nearest integer and clamped. `lo == hi` yields
/// the all-zero grid.
pub fn rescale<T: Sample>(grid: &Grid<T>, lo: f64, hi: f64) -> Grid<u8> {
    let range = hi - lo;
    if range <= 0.0 {
        log::debug!(
            "flat {}x{} input (value {lo}), contrast stretch yields zeros",
            grid.width(),
            grid.height()
        );
        return Grid::new(grid.width(), grid.height());
    }

    grid.map(|v| ((v.to_f64() - lo) * 255.0 / range).round().clamp(0.0, 255.0) as u8)
}
