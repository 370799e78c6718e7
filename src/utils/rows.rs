//! Row-at-a-time execution for per-pixel stages
//!
//! Every filter writes its output one row at a time from a read-only input,
//! so rows can be handed to the rayon pool with no synchronisation.

use crate::models::Grid;
use rayon::prelude::*;

/// Fill `out` by calling `f(y, row)` for every row
pub(crate) fn fill_rows<T, F>(out: &mut Grid<T>, parallel: bool, f: F)
where
    T: Copy + Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let width = out.width();
    if width == 0 {
        return;
    }
    let data = out.as_mut_slice();
    if parallel {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

/// Allocate a `width x height` grid and fill it row by row
pub(crate) fn build_rows<T, F>(width: usize, height: usize, parallel: bool, f: F) -> Grid<T>
where
    T: Copy + Default + Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let mut out = Grid::new(width, height);
    fill_rows(&mut out, parallel, f);
    out
}
