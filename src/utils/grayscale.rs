/// Convert a colour raster to greyscale luminance
/// Y = round(0.299*R + 0.587*G + 0.114*B)
/// Uses exact integer arithmetic in thousandths: Y = (299*R + 587*G + 114*B + 500) / 1000
///
/// The coefficients sum to 1000, so the result never exceeds 255.
use crate::models::{ColorRaster, Grid};
use crate::utils::rows::build_rows;

/// Coefficients for grayscale conversion, in thousandths
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;
const COEF_SCALE: u32 = 1000;

/// Luminance of a single RGB triple, rounded half up
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let sum = COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32;
    ((sum + COEF_SCALE / 2) / COEF_SCALE) as u8
}

/// Convert a colour raster to greyscale
pub fn rgb_to_grayscale(raster: &ColorRaster) -> Grid<u8> {
    convert(raster, false)
}

/// Convert a colour raster to greyscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(raster: &ColorRaster) -> Grid<u8> {
    convert(raster, true)
}

pub(crate) fn convert(raster: &ColorRaster, parallel: bool) -> Grid<u8> {
    let (red, green, blue) = (raster.red(), raster.green(), raster.blue());
    build_rows(red.width(), red.height(), parallel, |y, row| {
        let (r, g, b) = (red.row(y), green.row(y), blue.row(y));
        for (x, out) in row.iter_mut().enumerate() {
            *out = luminance(r[x], g[x], b[x]);
        }
    })
}
