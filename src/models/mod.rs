/// Inclusive pixel rectangle
pub mod bbox;
/// Row-major sample buffer, masks and label maps
pub mod grid;
/// Three-channel colour input
pub mod raster;

pub use bbox::BoundingBox;
pub use grid::{BinaryMask, FOREGROUND, Grid, LabelMap};
pub use raster::ColorRaster;
