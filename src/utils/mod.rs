//! Per-pixel image stages
//!
//! This module provides the point-wise steps of the locator:
//! - Grayscale conversion (RGB planes to luminance)
//! - Contrast stretch (linear rescale into 0..=255)
//! - Binarization (fixed cut-off and Otsu's method)

/// Fixed and Otsu thresholding
pub mod binarization;
/// Linear rescale into 0..=255
pub mod contrast;
/// RGB to luminance
pub mod grayscale;
pub(crate) mod rows;
