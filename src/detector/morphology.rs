//! Binary morphology with a flat 3x3 structuring element
//!
//! Both operations only compute pixels whose full 3x3 neighbourhood lies
//! inside the image. The outermost ring is always written as background.

use crate::models::{BinaryMask, FOREGROUND};
use crate::utils::rows::build_rows;

/// Foreground if any pixel of the 3x3 neighbourhood is foreground
pub fn dilate(mask: &BinaryMask, parallel: bool) -> BinaryMask {
    apply(mask, parallel, |window| {
        window.iter().any(|row| row.iter().any(|&v| v != 0))
    })
}

/// Foreground only if every pixel of the 3x3 neighbourhood is foreground
pub fn erode(mask: &BinaryMask, parallel: bool) -> BinaryMask {
    apply(mask, parallel, |window| {
        window.iter().all(|row| row.iter().all(|&v| v != 0))
    })
}

/// Apply [`dilate`] `iterations` times
pub fn dilate_n(mask: &BinaryMask, iterations: usize, parallel: bool) -> BinaryMask {
    repeat(mask, iterations, |m| dilate(m, parallel))
}

/// Apply [`erode`] `iterations` times
pub fn erode_n(mask: &BinaryMask, iterations: usize, parallel: bool) -> BinaryMask {
    repeat(mask, iterations, |m| erode(m, parallel))
}

/// Dilate then erode: bridges gaps between edge fragments and trims speckle
pub fn close(mask: &BinaryMask, dilations: usize, erosions: usize, parallel: bool) -> BinaryMask {
    let dilated = dilate_n(mask, dilations, parallel);
    erode_n(&dilated, erosions, parallel)
}

fn repeat(
    mask: &BinaryMask,
    iterations: usize,
    op: impl Fn(&BinaryMask) -> BinaryMask,
) -> BinaryMask {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = op(&current);
    }
    current
}

fn apply<F>(mask: &BinaryMask, parallel: bool, hit: F) -> BinaryMask
where
    F: Fn(&[&[u8]; 3]) -> bool + Sync + Send,
{
    let (width, height) = (mask.width(), mask.height());
    build_rows(width, height, parallel, |y, row| {
        if y == 0 || y + 1 >= height {
            return;
        }
        let rows = [mask.row(y - 1), mask.row(y), mask.row(y + 1)];
        for x in 1..width.saturating_sub(1) {
            let window = [
                &rows[0][x - 1..=x + 1],
                &rows[1][x - 1..=x + 1],
                &rows[2][x - 1..=x + 1],
            ];
            if hit(&window) {
                row[x] = FOREGROUND;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grid;

    fn block(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> BinaryMask {
        Grid::from_fn(w, h, |x, y| {
            if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) {
                FOREGROUND
            } else {
                0
            }
        })
    }

    #[test]
    fn test_dilate_single_pixel() {
        let mut mask: BinaryMask = Grid::new(7, 7);
        mask.set(3, 3, FOREGROUND);
        let out = dilate(&mask, false);
        assert_eq!(out, block(7, 7, 2, 2, 4, 4));
    }

    #[test]
    fn test_erode_removes_speckle() {
        let mut mask = block(9, 9, 2, 2, 6, 6);
        mask.set(8, 0, FOREGROUND);
        let out = erode(&mask, false);
        assert_eq!(out, block(9, 9, 3, 3, 5, 5));
    }

    #[test]
    fn test_erode_clears_border() {
        let mask: BinaryMask = Grid::filled(5, 4, FOREGROUND);
        let out = erode(&mask, false);
        assert_eq!(out, block(5, 4, 1, 1, 3, 2));
    }

    #[test]
    fn test_dilate_keeps_border_background() {
        let mut mask: BinaryMask = Grid::new(5, 5);
        mask.set(1, 1, FOREGROUND);
        let out = dilate(&mask, false);
        assert_eq!(out.get(0, 0), 0);
        assert_eq!(out.get(1, 0), 0);
        assert_eq!(out.get(2, 2), FOREGROUND);
        assert_eq!(out.count_nonzero(), 4);
    }

    #[test]
    fn test_closing_bridges_gap() {
        // Two bars separated by a one-pixel gap
        let mut mask = block(16, 12, 3, 4, 6, 7);
        for y in 4..=7 {
            for x in 8..=11 {
                mask.set(x, y, FOREGROUND);
            }
        }
        let closed = close(&mask, 2, 2, false);
        assert_eq!(closed, block(16, 12, 3, 4, 11, 7));
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let mask = block(6, 6, 1, 1, 3, 3);
        assert_eq!(close(&mask, 0, 0, false), mask);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mask: BinaryMask = Grid::from_fn(40, 30, |x, y| {
            if (x * 7 + y * 13) % 5 < 2 { FOREGROUND } else { 0 }
        });
        assert_eq!(dilate(&mask, false), dilate(&mask, true));
        assert_eq!(erode(&mask, false), erode(&mask, true));
    }
}
