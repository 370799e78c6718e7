//! Neighbourhood filters and region analysis
//!
//! This module contains the stages that look beyond a single pixel:
//! - Sobel gradient magnitude (edge strength)
//! - Box smoothing of the gradient map
//! - Binary dilation and erosion
//! - 4-connected component labeling
//! - Largest-region selection and bounding box extraction

/// 4-connected flood-fill labeling and component sizes
pub mod connected_components;
/// Sobel edge responses and gradient magnitude
pub mod gradient;
/// 3x3 dilation, erosion and closing
pub mod morphology;
/// Largest component selection and bounding boxes
pub mod region;
/// Repeated 3x3 box averaging
pub mod smoothing;
