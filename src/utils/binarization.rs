use crate::models::{BinaryMask, FOREGROUND, Grid};

/// Global threshold binarization
/// Pixels at or above `cutoff` become foreground (255), the rest background (0)
pub fn threshold_binarize(gray: &Grid<u8>, cutoff: u8) -> BinaryMask {
    gray.map(|v| if v >= cutoff { FOREGROUND } else { 0 })
}

/// Binarize using Otsu's optimal cut-off for this image
pub fn otsu_binarize(gray: &Grid<u8>) -> BinaryMask {
    threshold_binarize(gray, otsu_threshold(gray))
}

/// Calculate Otsu's optimal threshold
///
/// Returns the cut-off `t` maximising the between-class variance of the
/// classes `< t` and `>= t`. Images with fewer than two distinct values have
/// no split and fall back to 128.
pub fn otsu_threshold(gray: &Grid<u8>) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray.as_slice() {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as u64;
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as u64 * c)
        .sum();

    let mut max_variance = 0.0f64;
    let mut optimal_threshold = 128u8;

    // Running sums for the `< threshold` class
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;

    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1];
        class1_sum += (threshold as u64 - 1) * histogram[threshold - 1];
        let class2_pixels = total_pixels - class1_pixels;

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels as f64;
        let weight2 = class2_pixels as f64 / total_pixels as f64;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = Grid::from_vec(2, 2, vec![100, 150, 200, 50]).unwrap(); // 2x2 image
        let binary = threshold_binarize(&gray, 150);

        // Pixels >= 150 are foreground
        assert_eq!(binary.get(0, 0), 0); // 100 < 150
        assert_eq!(binary.get(1, 0), 255); // 150 >= 150
        assert_eq!(binary.get(0, 1), 255); // 200 >= 150
        assert_eq!(binary.get(1, 1), 0); // 50 < 150
    }

    #[test]
    fn test_threshold_zero_cutoff_selects_everything() {
        let gray: Grid<u8> = Grid::new(3, 3);
        assert_eq!(threshold_binarize(&gray, 0).count_nonzero(), 9);
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut data = vec![50u8; 50]; // Dark class
        data.extend(vec![200u8; 50]); // Light class
        let gray = Grid::from_vec(10, 10, data).unwrap();

        let t = otsu_threshold(&gray);
        assert!(t > 50 && t <= 200);

        // Top half dark (background), bottom half light (foreground)
        let binary = otsu_binarize(&gray);
        assert_eq!(binary.get(0, 0), 0);
        assert_eq!(binary.get(0, 7), 255);
    }

    #[test]
    fn test_otsu_flat_image_falls_back() {
        let gray: Grid<u8> = Grid::filled(4, 4, 0);
        assert_eq!(otsu_threshold(&gray), 128);
        assert_eq!(otsu_binarize(&gray).count_nonzero(), 0);
    }
}
