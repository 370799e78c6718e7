//! The locator stage chain
//!
//! greyscale -> contrast stretch -> gradient magnitude -> smoothing ->
//! renormalise -> threshold -> closing -> labeling -> largest region.
//!
//! Each stage reads the previous stage's grid and produces a fresh one of the
//! same size; nothing is shared between runs.

use crate::config::{DetectorConfig, ThresholdMode};
use crate::detector::connected_components::{Labeling, label_components};
use crate::detector::gradient::gradient_magnitude;
use crate::detector::morphology::close;
use crate::detector::region::{Region, component_mask, select_largest_region};
use crate::detector::smoothing::smooth;
use crate::error::DetectError;
use crate::models::{BinaryMask, ColorRaster, Grid};
use crate::utils::binarization::{otsu_threshold, threshold_binarize};
use crate::utils::contrast::normalize_to_u8;
use crate::utils::grayscale;
use std::time::{Duration, Instant};

/// Every intermediate grid of one run, for visualisation tooling
#[derive(Debug, Clone)]
pub struct PipelineStages {
    /// Luminance of the input
    pub greyscale: Grid<u8>,
    /// Greyscale after the contrast stretch (a copy when disabled)
    pub stretched: Grid<u8>,
    /// Sobel gradient magnitude, unbounded
    pub gradient: Grid<f32>,
    /// Smoothed gradient renormalised into `0..=255`
    pub smoothed: Grid<u8>,
    /// Thresholded mask
    pub thresholded: BinaryMask,
    /// Mask after dilation and erosion
    pub morphed: BinaryMask,
    /// Component labels of the morphed mask
    pub labeling: Labeling,
    /// Pixels of the selected component only (empty when nothing was found)
    pub selected: BinaryMask,
}

/// Counters and timings collected during one run
#[derive(Debug, Clone, Default)]
pub struct PipelineTelemetry {
    /// Cut-off actually applied (resolved for Otsu)
    pub cutoff: u8,
    /// Foreground pixels after thresholding
    pub thresholded_pixels: usize,
    /// Foreground pixels after morphology
    pub morphed_pixels: usize,
    /// Number of 4-connected components
    pub components: usize,
    /// Size of the selected component
    pub selected_pixels: usize,
    /// Wall time spent in each named stage
    pub timings: Vec<(&'static str, Duration)>,
}

impl PipelineTelemetry {
    /// Sum of all stage timings
    pub fn total_time(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }
}

/// Result of one complete pipeline run
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Intermediate grids
    pub stages: PipelineStages,
    /// Selected region, `None` when the morphed mask was empty
    pub region: Option<Region>,
    /// Counters and timings
    pub telemetry: PipelineTelemetry,
}

impl PipelineRun {
    /// The selected region, or [`DetectError::NoRegionFound`]
    pub fn into_region(self) -> Result<Region, DetectError> {
        self.region.ok_or(DetectError::NoRegionFound)
    }
}

/// Run every stage over `raster`
///
/// Input is already validated by [`ColorRaster`]'s constructors, so this
/// never fails; an empty morphed mask is reported as `region: None`.
pub fn run(raster: &ColorRaster, config: &DetectorConfig) -> PipelineRun {
    let mut tel = PipelineTelemetry::default();
    let parallel = config.parallel;

    let greyscale = timed(&mut tel, "greyscale", || {
        grayscale::convert(raster, parallel)
    });

    let stretched = timed(&mut tel, "stretch", || {
        if config.stretch_contrast {
            normalize_to_u8(&greyscale)
        } else {
            greyscale.clone()
        }
    });

    let gradient = timed(&mut tel, "gradient", || {
        gradient_magnitude(&stretched, parallel)
    });

    let smoothed = timed(&mut tel, "smoothing", || {
        let blurred = smooth(&gradient, config.smoothing_iterations, parallel);
        normalize_to_u8(&blurred)
    });

    // Zero-valued pixels are never foreground, whatever the configured cut-off
    let cutoff = match config.threshold {
        ThresholdMode::Fixed(cutoff) => cutoff.max(1),
        ThresholdMode::Otsu => otsu_threshold(&smoothed),
    };
    tel.cutoff = cutoff;
    let thresholded = timed(&mut tel, "threshold", || {
        threshold_binarize(&smoothed, cutoff)
    });
    tel.thresholded_pixels = thresholded.count_nonzero();

    let morphed = timed(&mut tel, "morphology", || {
        close(
            &thresholded,
            config.dilation_iterations,
            config.erosion_iterations,
            parallel,
        )
    });
    tel.morphed_pixels = morphed.count_nonzero();

    let (labeling, region) = timed(&mut tel, "labeling", || {
        let labeling = label_components(&morphed);
        let region = select_largest_region(&labeling).ok();
        (labeling, region)
    });
    tel.components = labeling.sizes.len();
    tel.selected_pixels = region.map_or(0, |r| r.size);

    let selected = match region {
        Some(r) => component_mask(&labeling.labels, r.label),
        None => Grid::new(morphed.width(), morphed.height()),
    };

    log::debug!(
        "{}x{}: cutoff={} thresholded={} morphed={} components={} selected={}",
        raster.width(),
        raster.height(),
        tel.cutoff,
        tel.thresholded_pixels,
        tel.morphed_pixels,
        tel.components,
        tel.selected_pixels
    );
    match &region {
        Some(r) => log::debug!("selected label {} with box {}", r.label, r.bbox),
        None => log::debug!("no foreground component after morphology"),
    }
    log::trace!("pipeline finished in {:?}", tel.total_time());

    PipelineRun {
        stages: PipelineStages {
            greyscale,
            stretched,
            gradient,
            smoothed,
            thresholded,
            morphed,
            labeling,
            selected,
        },
        region,
        telemetry: tel,
    }
}

/// Locate the region in a mask that is already binarized
///
/// Skips the edge stages: closing, labeling and selection only.
pub fn locate_in_mask(mask: &BinaryMask, config: &DetectorConfig) -> Result<Region, DetectError> {
    let morphed = close(
        mask,
        config.dilation_iterations,
        config.erosion_iterations,
        config.parallel,
    );
    select_largest_region(&label_components(&morphed))
}

fn timed<T>(tel: &mut PipelineTelemetry, stage: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    log::trace!("stage {stage} took {elapsed:?}");
    tel.timings.push((stage, elapsed));
    out
}
