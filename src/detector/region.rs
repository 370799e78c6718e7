/// Region selection and bounding box extraction
use crate::detector::connected_components::Labeling;
use crate::error::DetectError;
use crate::models::{BinaryMask, BoundingBox, FOREGROUND, LabelMap};

/// The component chosen as the QR code candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Component label in the label map
    pub label: u32,
    /// Pixel count of the component
    pub size: usize,
    /// Tight box around every pixel of the component
    pub bbox: BoundingBox,
}

/// Pick the largest component and measure its bounding box
///
/// Ties on size go to the component discovered first. An empty size table
/// is reported as [`DetectError::NoRegionFound`].
pub fn select_largest_region(labeling: &Labeling) -> Result<Region, DetectError> {
    let (label, size) = labeling
        .sizes
        .largest()
        .ok_or(DetectError::NoRegionFound)?;
    let bbox = bounding_box(&labeling.labels, label).ok_or(DetectError::NoRegionFound)?;
    Ok(Region { label, size, bbox })
}

/// Tight bounding box of the pixels carrying `label`
///
/// Scans the label map once; `None` when no pixel has the label.
pub fn bounding_box(labels: &LabelMap, label: u32) -> Option<BoundingBox> {
    if label == 0 {
        return None;
    }
    let mut bbox: Option<BoundingBox> = None;
    for y in 0..labels.height() {
        for (x, &l) in labels.row(y).iter().enumerate() {
            if l != label {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            match bbox.as_mut() {
                Some(b) => b.include(x, y),
                None => bbox = Some(BoundingBox::at(x, y)),
            }
        }
    }
    bbox
}

/// Mask holding only the pixels of `label`
pub fn component_mask(labels: &LabelMap, label: u32) -> BinaryMask {
    labels.map(|l| if l != 0 && l == label { FOREGROUND } else { 0 })
}
