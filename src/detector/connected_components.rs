/// Connected component labeling for the morphed foreground mask
/// Partitions foreground pixels into maximal 4-connected regions and counts
/// the pixels of each one.
use crate::models::{BinaryMask, Grid, LabelMap};
use std::collections::VecDeque;

/// Pixel count per component label
///
/// Labels start at 1; `counts[label - 1]` holds the size of `label`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSizes {
    counts: Vec<usize>,
}

impl ComponentSizes {
    /// Number of components
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no foreground component exists
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pixel count of `label`, or `None` for 0 and unknown labels
    pub fn get(&self, label: u32) -> Option<usize> {
        let idx = (label as usize).checked_sub(1)?;
        self.counts.get(idx).copied()
    }

    /// `(label, size)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &size)| (i as u32 + 1, size))
    }

    /// Sum of all component sizes
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Label with the strictly largest size; ties go to the smallest label
    pub fn largest(&self) -> Option<(u32, usize)> {
        self.iter()
            .fold(None, |best, (label, size)| match best {
                Some((_, best_size)) if best_size >= size => best,
                _ => Some((label, size)),
            })
    }
}

/// Label map together with its size table
#[derive(Debug, Clone, PartialEq)]
pub struct Labeling {
    /// Per-pixel component label, 0 for background
    pub labels: LabelMap,
    /// Pixel count per label
    pub sizes: ComponentSizes,
}

/// Label the 4-connected foreground components of `mask`
///
/// Pixels are scanned in row-major order. Each unvisited foreground pixel
/// seeds a breadth-first flood fill that gives every reachable pixel the next
/// label. Sizes are then counted in a separate pass over the label map.
pub fn label_components(mask: &BinaryMask) -> Labeling {
    let (width, height) = (mask.width(), mask.height());
    let mut labels: LabelMap = Grid::new(width, height);
    let mut queue = VecDeque::new();
    let mut next_label = 1u32;

    for y in 0..height {
        for x in 0..width {
            if mask.get(x, y) == 0 || labels.get(x, y) != 0 {
                continue;
            }

            let label = next_label;
            next_label += 1;
            labels.set(x, y, label);
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                for (nx, ny) in neighbors4(cx, cy, width, height) {
                    if mask.get(nx, ny) != 0 && labels.get(nx, ny) == 0 {
                        // Mark on enqueue so no pixel is queued twice
                        labels.set(nx, ny, label);
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }

    let sizes = component_sizes(&labels, (next_label - 1) as usize);
    log::trace!(
        "labeled {} components over {} foreground pixels",
        sizes.len(),
        sizes.total()
    );
    Labeling { labels, sizes }
}

/// Count the pixels carrying each label in `1..=component_count`
///
/// Labels outside that range are not counted.
pub(crate) fn component_sizes(labels: &LabelMap, component_count: usize) -> ComponentSizes {
    let mut counts = vec![0usize; component_count];
    for &label in labels.as_slice() {
        let slot = (label as usize)
            .checked_sub(1)
            .and_then(|idx| counts.get_mut(idx));
        if let Some(count) = slot {
            *count += 1;
        }
    }
    ComponentSizes { counts }
}

/// Up, left, right, down neighbours of `(x, y)` that lie inside the image
fn neighbors4(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let up = (y > 0).then(|| (x, y - 1));
    let left = (x > 0).then(|| (x - 1, y));
    let right = (x + 1 < width).then(|| (x + 1, y));
    let down = (y + 1 < height).then(|| (x, y + 1));
    [up, left, right, down].into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FOREGROUND;

    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let height = rows.len();
        let width = rows[0].len();
        Grid::from_fn(width, height, |x, y| {
            if rows[y].as_bytes()[x] == b'#' {
                FOREGROUND
            } else {
                0
            }
        })
    }

    #[test]
    fn test_single_block() {
        let mut mask: BinaryMask = Grid::new(10, 10);
        // Create 2x2 block at (2,2)
        mask.set(2, 2, FOREGROUND);
        mask.set(3, 2, FOREGROUND);
        mask.set(2, 3, FOREGROUND);
        mask.set(3, 3, FOREGROUND);

        let labeling = label_components(&mask);
        assert_eq!(labeling.sizes.len(), 1);
        assert_eq!(labeling.sizes.get(1), Some(4));
        assert_eq!(labeling.labels.get(3, 3), 1);
        assert_eq!(labeling.labels.get(4, 4), 0);
    }

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        let labeling = label_components(&mask);
        assert_eq!(labeling.sizes.len(), 3);
        assert_eq!(labeling.labels.get(0, 0), 1);
        assert_eq!(labeling.labels.get(1, 1), 2);
        assert_eq!(labeling.labels.get(2, 2), 3);
    }

    #[test]
    fn test_labels_follow_first_discovery() {
        let mask = mask_from_rows(&[
            "....##", //
            "##..##", //
            "##....", //
            "...#..", //
        ]);
        let labeling = label_components(&mask);
        // Top-right block is reached first in row-major order
        assert_eq!(labeling.labels.get(4, 0), 1);
        assert_eq!(labeling.labels.get(0, 1), 2);
        assert_eq!(labeling.labels.get(3, 3), 3);
        assert_eq!(
            labeling.sizes.iter().collect::<Vec<_>>(),
            vec![(1, 4), (2, 4), (3, 1)]
        );
    }

    #[test]
    fn test_u_shape_is_one_component() {
        // Arms only join through the bottom row
        let mask = mask_from_rows(&[
            "#...#", //
            "#...#", //
            "#####", //
        ]);
        let labeling = label_components(&mask);
        assert_eq!(labeling.sizes.len(), 1);
        assert_eq!(labeling.sizes.get(1), Some(9));
        assert_eq!(labeling.labels.get(4, 0), 1);
    }

    #[test]
    fn test_sizes_sum_to_foreground() {
        let mask: BinaryMask = Grid::from_fn(31, 17, |x, y| {
            if (x * x + 3 * y) % 7 < 3 { FOREGROUND } else { 0 }
        });
        let labeling = label_components(&mask);
        assert_eq!(labeling.sizes.total(), mask.count_nonzero());
        assert_eq!(labeling.labels.count_nonzero(), mask.count_nonzero());
    }

    #[test]
    fn test_large_region_does_not_overflow_stack() {
        let mask: BinaryMask = Grid::filled(1000, 1000, FOREGROUND);
        let labeling = label_components(&mask);
        assert_eq!(labeling.sizes.get(1), Some(1_000_000));
    }

    #[test]
    fn test_empty_mask() {
        let mask: BinaryMask = Grid::new(10, 10);
        let labeling = label_components(&mask);
        assert!(labeling.sizes.is_empty());
        assert_eq!(labeling.sizes.largest(), None);
    }

    #[test]
    fn test_component_sizes_skips_unknown_labels() {
        let labels = Grid::from_vec(4, 1, vec![0u32, 1, 7, 1]).unwrap();
        let sizes = component_sizes(&labels, 2);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.get(1), Some(2));
        assert_eq!(sizes.get(2), Some(0));
        assert_eq!(sizes.total(), 2);
    }

    #[test]
    fn test_largest_prefers_first_label_on_tie() {
        let sizes = ComponentSizes {
            counts: vec![3, 7, 7, 2],
        };
        assert_eq!(sizes.largest(), Some((2, 7)));
        assert_eq!(sizes.get(0), None);
        assert_eq!(sizes.get(5), None);
    }
}
