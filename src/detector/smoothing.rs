//! 3x3 box averaging over the gradient magnitude map
//! Border pixels follow the same zero policy as the gradient stage.

use crate::models::Grid;
use crate::utils::rows::build_rows;

/// One pass of unweighted 3x3 averaging
pub fn box_average_3x3(src: &Grid<f32>, parallel: bool) -> Grid<f32> {
    let (width, height) = (src.width(), src.height());
    build_rows(width, height, parallel, |y, row| {
        if y == 0 || y + 1 >= height {
            return;
        }
        let (above, here, below) = (src.row(y - 1), src.row(y), src.row(y + 1));
        for x in 1..width.saturating_sub(1) {
            let sum: f32 = (x - 1..=x + 1).map(|i| above[i] + here[i] + below[i]).sum();
            row[x] = sum / 9.0;
        }
    })
}

/// Apply [`box_average_3x3`] `iterations` times
///
/// Zero iterations returns an unchanged copy.
pub fn smooth(src: &Grid<f32>, iterations: usize, parallel: bool) -> Grid<f32> {
    let mut current = src.clone();
    for _ in 0..iterations {
        current = box_average_3x3(&current, parallel);
    }
    current
}
