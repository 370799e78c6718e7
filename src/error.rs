use thiserror::Error;

/// Errors surfaced by the locator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    /// Image has no pixels
    #[error("image has zero area ({width}x{height})")]
    ZeroDimension {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },

    /// A colour plane does not hold `width * height` samples
    #[error("{channel} channel holds {actual} samples, expected {expected}")]
    ChannelSizeMismatch {
        /// Channel name (`red`, `green` or `blue`)
        channel: &'static str,
        /// `width * height`
        expected: usize,
        /// Samples actually supplied
        actual: usize,
    },

    /// Interleaved RGB buffer does not hold `width * height * 3` bytes
    #[error("RGB buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// `width * height * 3`
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// No foreground component survived morphology
    #[error("no region found")]
    NoRegionFound,
}

impl DetectError {
    /// True for the malformed-input variants (everything but `NoRegionFound`)
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::NoRegionFound)
    }
}
