//! File-format glue around the locator
//!
//! Decoding, PNG output and the box overlay live here so the pipeline itself
//! never touches the filesystem.

use crate::error::DetectError;
use crate::models::{BoundingBox, ColorRaster, Grid, LabelMap};
use crate::pipeline::PipelineStages;
use crate::utils::contrast::{Sample, normalize_to_u8};
use image::{GrayImage, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the file tooling
#[derive(Debug, Error)]
pub enum ToolError {
    /// Decoding or encoding failed
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The decoded image is not a valid raster
    #[error(transparent)]
    Detect(#[from] DetectError),
    /// A grid could not be wrapped as an image buffer
    #[error("grid of {width}x{height} does not fit an image buffer")]
    Buffer {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },
}

/// Load any supported image file as a colour raster.
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<ColorRaster, ToolError> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(ColorRaster::from_interleaved(rgb.as_raw(), width, height)?)
}

/// Convert a raster back into an `image` RGB buffer.
pub fn raster_to_rgb_image(raster: &ColorRaster) -> Result<RgbImage, ToolError> {
    RgbImage::from_raw(raster.width(), raster.height(), raster.to_interleaved()).ok_or(
        ToolError::Buffer {
            width: raster.width() as usize,
            height: raster.height() as usize,
        },
    )
}

/// Wrap an 8-bit grid as a greyscale image.
pub fn grid_to_gray_image(grid: &Grid<u8>) -> Result<GrayImage, ToolError> {
    let buffer_err = || ToolError::Buffer {
        width: grid.width(),
        height: grid.height(),
    };
    let w = u32::try_from(grid.width()).map_err(|_| buffer_err())?;
    let h = u32::try_from(grid.height()).map_err(|_| buffer_err())?;
    GrayImage::from_raw(w, h, grid.as_slice().to_vec()).ok_or_else(buffer_err)
}

/// Write an 8-bit grid as a greyscale PNG.
pub fn save_gray_png<P: AsRef<Path>>(grid: &Grid<u8>, path: P) -> Result<(), ToolError> {
    grid_to_gray_image(grid)?.save(path)?;
    Ok(())
}

/// Stretch any grid into `0..=255` and write it as a greyscale PNG.
pub fn save_normalized_png<T: Sample, P: AsRef<Path>>(
    grid: &Grid<T>,
    path: P,
) -> Result<(), ToolError> {
    save_gray_png(&normalize_to_u8(grid), path)
}

/// Render a label map with one grey level per label, background black.
pub fn labels_to_gray(labels: &LabelMap) -> Grid<u8> {
    let max = labels.as_slice().iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Grid::new(labels.width(), labels.height());
    }
    // Keep label 1 visibly brighter than background
    labels.map(|l| {
        if l == 0 {
            0
        } else {
            (64 + (l as u64 - 1) * 191 / max as u64).min(255) as u8
        }
    })
}

/// Write every intermediate stage as a PNG into `dir`.
///
/// Returns the written paths in pipeline order.
pub fn save_stages<P: AsRef<Path>>(
    stages: &PipelineStages,
    dir: P,
) -> Result<Vec<PathBuf>, ToolError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let labels = labels_to_gray(&stages.labeling.labels);
    let byte_stages: [(&str, &Grid<u8>); 7] = [
        ("01_greyscale.png", &stages.greyscale),
        ("02_stretched.png", &stages.stretched),
        ("04_smoothed.png", &stages.smoothed),
        ("05_thresholded.png", &stages.thresholded),
        ("06_morphed.png", &stages.morphed),
        ("07_labels.png", &labels),
        ("08_selected.png", &stages.selected),
    ];

    let gradient_path = dir.join("03_gradient.png");
    save_normalized_png(&stages.gradient, &gradient_path)?;
    let mut written = vec![gradient_path];
    for (name, grid) in byte_stages {
        let path = dir.join(name);
        save_gray_png(grid, &path)?;
        written.push(path);
    }
    written.sort();
    for path in &written {
        log::debug!("wrote {}", path.display());
    }
    Ok(written)
}

/// Draw the outline of `bbox` onto `image`, growing inwards by `line_width`.
///
/// Parts of the outline outside the image are clipped.
pub fn draw_bbox(image: &mut RgbImage, bbox: &BoundingBox, color: [u8; 3], line_width: u32) {
    let (width, height) = image.dimensions();
    let line_width = line_width.max(1);
    for y in bbox.min_y..=bbox.max_y.min(height.saturating_sub(1)) {
        for x in bbox.min_x..=bbox.max_x.min(width.saturating_sub(1)) {
            let on_edge = x < bbox.min_x.saturating_add(line_width)
                || y < bbox.min_y.saturating_add(line_width)
                || x.saturating_add(line_width) > bbox.max_x
                || y.saturating_add(line_width) > bbox.max_y;
            if on_edge {
                image.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

/// Save `raster` with `bbox` outlined in `color`.
pub fn save_annotated<P: AsRef<Path>>(
    raster: &ColorRaster,
    bbox: &BoundingBox,
    color: [u8; 3],
    line_width: u32,
    path: P,
) -> Result<(), ToolError> {
    let mut image = raster_to_rgb_image(raster)?;
    draw_bbox(&mut image, bbox, color, line_width);
    image.save(path)?;
    Ok(())
}

/// Summary statistics for a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Mean value.
    pub mean: f64,
    /// Count of nonzero samples.
    pub nonzero: usize,
    /// Total samples in the grid.
    pub total: usize,
}

impl GridStats {
    /// Ratio of nonzero samples to total samples.
    pub fn nonzero_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.nonzero as f64 / self.total as f64
        }
    }
}

/// Compute min/max/mean and the nonzero count of a grid.
pub fn grid_stats<T: Sample>(grid: &Grid<T>) -> GridStats {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0f64;
    let mut nonzero = 0usize;
    for &v in grid.as_slice() {
        let v = v.to_f64();
        min = min.min(v);
        max = max.max(v);
        sum += v;
        if v != 0.0 {
            nonzero += 1;
        }
    }
    let total = grid.len();
    if total == 0 {
        return GridStats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            nonzero: 0,
            total: 0,
        };
    }
    GridStats {
        min,
        max,
        mean: sum / total as f64,
        nonzero,
        total,
    }
}
