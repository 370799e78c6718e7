//! qr_locate - find the QR code in a photograph
//!
//! A pure Rust locator that returns the axis-aligned bounding box of the most
//! prominent rectangular high-frequency blob in a colour image. It uses only
//! pixel-level analysis: greyscale conversion, contrast stretch, Sobel
//! gradients, box smoothing, thresholding, morphological closing and
//! 4-connected component labeling. The payload is not decoded.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Pipeline tuning and environment overrides
pub mod config;
/// Neighbourhood filters and region analysis (gradient, morphology, labeling)
pub mod detector;
/// Error type
pub mod error;
/// Core data structures (Grid, ColorRaster, BoundingBox)
pub mod models;
/// Stage chain, inspection record and telemetry
pub mod pipeline;
/// Image-file glue for binaries and tooling
pub mod tools;
/// Per-pixel stages (grayscale, contrast stretch, binarization)
pub mod utils;

pub use config::{DetectorConfig, ThresholdMode};
pub use detector::region::Region;
pub use error::DetectError;
pub use models::{BinaryMask, BoundingBox, ColorRaster, Grid, LabelMap};
pub use pipeline::{PipelineRun, PipelineStages, PipelineTelemetry};

/// Locate the QR code region with default settings
///
/// # Returns
/// The tight bounding box of the largest foreground component, or
/// [`DetectError::NoRegionFound`] when nothing survives morphology.
pub fn detect(image: &ColorRaster) -> Result<BoundingBox, DetectError> {
    detect_with_config(image, &DetectorConfig::default())
}

/// Locate the QR code region with explicit settings
pub fn detect_with_config(
    image: &ColorRaster,
    config: &DetectorConfig,
) -> Result<BoundingBox, DetectError> {
    pipeline::run(image, config)
        .into_region()
        .map(|region| region.bbox)
}

/// Locate the QR code region in an interleaved RGB buffer
///
/// # Arguments
/// * `rgb` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn detect_rgb(rgb: &[u8], width: u32, height: u32) -> Result<BoundingBox, DetectError> {
    let raster = ColorRaster::from_interleaved(rgb, width, height)?;
    detect(&raster)
}

/// Run the full pipeline and keep every intermediate grid
///
/// Unlike [`detect`], an empty result is not an error here: the stages are
/// still useful for inspection, and [`PipelineRun::region`] is `None`.
pub fn inspect(image: &ColorRaster, config: &DetectorConfig) -> PipelineRun {
    pipeline::run(image, config)
}

/// Reusable locator holding a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Create a detector with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given settings
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Create a detector configured from `QR_*` environment variables
    pub fn from_env() -> Self {
        Self::with_config(DetectorConfig::from_env())
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Locate the QR code region in `image`
    pub fn detect(&self, image: &ColorRaster) -> Result<BoundingBox, DetectError> {
        detect_with_config(image, &self.config)
    }

    /// Locate the region and report its label and size as well
    pub fn detect_region(&self, image: &ColorRaster) -> Result<Region, DetectError> {
        pipeline::run(image, &self.config).into_region()
    }

    /// Run the full pipeline and keep every intermediate grid
    pub fn inspect(&self, image: &ColorRaster) -> PipelineRun {
        pipeline::run(image, &self.config)
    }
}
