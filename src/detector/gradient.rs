//! Sobel gradient estimation
//! Two 3x3 derivative kernels, normalised by 1/8, produce absolute directional
//! responses that are combined into a per-pixel magnitude.
//!
//! The kernel has radius 1, so the outermost pixel ring has no full
//! neighbourhood and is written as 0.

use crate::models::Grid;
use crate::utils::contrast::Sample;
use crate::utils::rows::build_rows;

/// 3x3 kernel indexed `[dy + 1][dx + 1]`
type Kernel = [[f32; 3]; 3];

/// Derivative across columns, responds to vertical edges
const SOBEL_X: Kernel = [
    [-0.125, 0.0, 0.125],
    [-0.25, 0.0, 0.25],
    [-0.125, 0.0, 0.125],
];

/// Derivative across rows, responds to horizontal edges
const SOBEL_Y: Kernel = [
    [-0.125, -0.25, -0.125],
    [0.0, 0.0, 0.0],
    [0.125, 0.25, 0.125],
];

/// Absolute response to vertical edges (`|d/dx|`)
pub fn vertical_edges<T: Sample>(gray: &Grid<T>, parallel: bool) -> Grid<f32> {
    convolve_abs(gray, &SOBEL_X, parallel)
}

/// Absolute response to horizontal edges (`|d/dy|`)
pub fn horizontal_edges<T: Sample>(gray: &Grid<T>, parallel: bool) -> Grid<f32> {
    convolve_abs(gray, &SOBEL_Y, parallel)
}

/// Combine directional responses as `sqrt(h^2 + v^2)`
///
/// Returns `None` when the two maps differ in size.
pub fn edge_magnitude(horizontal: &Grid<f32>, vertical: &Grid<f32>) -> Option<Grid<f32>> {
    horizontal
        .same_size(vertical)
        .then(|| magnitude(horizontal, vertical))
}

/// Gradient magnitude of `gray` in one call
pub fn gradient_magnitude<T: Sample>(gray: &Grid<T>, parallel: bool) -> Grid<f32> {
    let horizontal = horizontal_edges(gray, parallel);
    let vertical = vertical_edges(gray, parallel);
    magnitude(&horizontal, &vertical)
}

fn magnitude(horizontal: &Grid<f32>, vertical: &Grid<f32>) -> Grid<f32> {
    Grid::from_fn(horizontal.width(), horizontal.height(), |x, y| {
        let (h, v) = (horizontal.get(x, y), vertical.get(x, y));
        (h * h + v * v).sqrt()
    })
}

fn convolve_abs<T: Sample>(src: &Grid<T>, kernel: &Kernel, parallel: bool) -> Grid<f32> {
    let (width, height) = (src.width(), src.height());
    build_rows(width, height, parallel, |y, row| {
        if y == 0 || y + 1 >= height {
            return;
        }
        let rows = [src.row(y - 1), src.row(y), src.row(y + 1)];
        for x in 1..width.saturating_sub(1) {
            let mut acc = 0.0f64;
            for (k_row, src_row) in kernel.iter().zip(rows) {
                for (dx, &k) in k_row.iter().enumerate() {
                    acc += k as f64 * src_row[x + dx - 1].to_f64();
                }
            }
            row[x] = acc.abs() as f32;
        }
    })
}
