//! Pipeline tuning
//!
//! `DetectorConfig::default()` gives the documented defaults;
//! `DetectorConfig::from_env()` lets `QR_*` environment variables override
//! them. Unparsable values fall back to the default.

use std::fmt;
use std::str::FromStr;

/// Default cut-off applied to the renormalised smoothed gradient map
pub const DEFAULT_THRESHOLD: u8 = 70;
/// Default number of box-averaging passes
pub const DEFAULT_SMOOTHING_ITERATIONS: usize = 2;
/// Default number of dilations in the closing step
pub const DEFAULT_DILATION_ITERATIONS: usize = 2;
/// Default number of erosions in the closing step
pub const DEFAULT_EROSION_ITERATIONS: usize = 2;

/// How the binarization cut-off is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Pixels `>= cutoff` become foreground
    Fixed(u8),
    /// Cut-off chosen per image by Otsu's method
    Otsu,
}

impl Default for ThresholdMode {
    fn default() -> Self {
        Self::Fixed(DEFAULT_THRESHOLD)
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(cutoff) => write!(f, "{cutoff}"),
            Self::Otsu => f.write_str("otsu"),
        }
    }
}

impl FromStr for ThresholdMode {
    type Err = String;

    /// Accepts `otsu` (any case) or an integer cut-off in `1..=255`
    ///
    /// A cut-off of 0 would mark every pixel as foreground, including the
    /// all-zero map of a flat image, so it is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("otsu") {
            return Ok(Self::Otsu);
        }
        s.parse::<u8>()
            .ok()
            .filter(|&cutoff| cutoff > 0)
            .map(Self::Fixed)
            .ok_or_else(|| format!("invalid threshold '{s}': expected 'otsu' or 1-255"))
    }
}

/// Tunable parameters of the locator pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Binarization cut-off policy
    pub threshold: ThresholdMode,
    /// Box-averaging passes over the gradient map
    pub smoothing_iterations: usize,
    /// Dilations applied before erosion
    pub dilation_iterations: usize,
    /// Erosions applied after dilation
    pub erosion_iterations: usize,
    /// Stretch the greyscale image to the full range before edge detection
    pub stretch_contrast: bool,
    /// Shard per-pixel stages across the rayon pool
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdMode::default(),
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            dilation_iterations: DEFAULT_DILATION_ITERATIONS,
            erosion_iterations: DEFAULT_EROSION_ITERATIONS,
            stretch_contrast: true,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Defaults overridden by `QR_*` environment variables
    ///
    /// | variable                  | field                  |
    /// |---------------------------|------------------------|
    /// | `QR_THRESHOLD`            | `threshold`            |
    /// | `QR_SMOOTHING_ITERATIONS` | `smoothing_iterations` |
    /// | `QR_DILATION_ITERATIONS`  | `dilation_iterations`  |
    /// | `QR_EROSION_ITERATIONS`   | `erosion_iterations`   |
    /// | `QR_STRETCH_CONTRAST`     | `stretch_contrast`     |
    /// | `QR_PARALLEL`             | `parallel`             |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_usize = |name: &str, default: usize| {
            lookup(name)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(default)
        };
        let parse_bool_u8 = |name: &str, default: bool| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u8>().ok())
                .map(|v| v != 0)
                .unwrap_or(default)
        };

        Self {
            threshold: lookup("QR_THRESHOLD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.threshold),
            smoothing_iterations: parse_usize(
                "QR_SMOOTHING_ITERATIONS",
                defaults.smoothing_iterations,
            ),
            dilation_iterations: parse_usize("QR_DILATION_ITERATIONS", defaults.dilation_iterations),
            erosion_iterations: parse_usize("QR_EROSION_ITERATIONS", defaults.erosion_iterations),
            stretch_contrast: parse_bool_u8("QR_STRETCH_CONTRAST", defaults.stretch_contrast),
            parallel: parse_bool_u8("QR_PARALLEL", defaults.parallel),
        }
    }

    /// Set the binarization policy
    pub fn with_threshold(mut self, threshold: ThresholdMode) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of smoothing passes
    pub fn with_smoothing_iterations(mut self, iterations: usize) -> Self {
        self.smoothing_iterations = iterations;
        self
    }

    /// Set the number of dilations
    pub fn with_dilation_iterations(mut self, iterations: usize) -> Self {
        self.dilation_iterations = iterations;
        self
    }

    /// Set the number of erosions
    pub fn with_erosion_iterations(mut self, iterations: usize) -> Self {
        self.erosion_iterations = iterations;
        self
    }

    /// Enable or disable the greyscale contrast stretch
    pub fn with_stretch_contrast(mut self, enabled: bool) -> Self {
        self.stretch_contrast = enabled;
        self
    }

    /// Enable or disable row-parallel filtering
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.threshold, ThresholdMode::Fixed(70));
        assert_eq!(config.smoothing_iterations, 2);
        assert_eq!(config.dilation_iterations, 2);
        assert_eq!(config.erosion_iterations, 2);
        assert!(config.stretch_contrast);
        assert!(!config.parallel);
    }

    #[test]
    fn test_env_overrides() {
        let config = DetectorConfig::from_lookup(lookup(&[
            ("QR_THRESHOLD", "Otsu"),
            ("QR_SMOOTHING_ITERATIONS", " 4 "),
            ("QR_DILATION_ITERATIONS", "3"),
            ("QR_PARALLEL", "1"),
            ("QR_STRETCH_CONTRAST", "0"),
        ]));
        assert_eq!(config.threshold, ThresholdMode::Otsu);
        assert_eq!(config.smoothing_iterations, 4);
        assert_eq!(config.dilation_iterations, 3);
        assert_eq!(config.erosion_iterations, 2);
        assert!(config.parallel);
        assert!(!config.stretch_contrast);
    }

    #[test]
    fn test_bad_env_values_fall_back() {
        let config = DetectorConfig::from_lookup(lookup(&[
            ("QR_THRESHOLD", "300"),
            ("QR_EROSION_ITERATIONS", "-1"),
            ("QR_PARALLEL", "yes"),
        ]));
        assert_eq!(config, DetectorConfig::default());
    }

    #[test]
    fn test_zero_threshold_env_falls_back() {
        let config = DetectorConfig::from_lookup(lookup(&[("QR_THRESHOLD", "0")]));
        assert_eq!(config.threshold, ThresholdMode::Fixed(DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_threshold_mode_parse() {
        assert_eq!("otsu".parse::<ThresholdMode>(), Ok(ThresholdMode::Otsu));
        assert_eq!("128".parse::<ThresholdMode>(), Ok(ThresholdMode::Fixed(128)));
        assert!("abc".parse::<ThresholdMode>().is_err());
        assert!("0".parse::<ThresholdMode>().is_err());
        assert_eq!("1".parse::<ThresholdMode>(), Ok(ThresholdMode::Fixed(1)));
        assert_eq!(ThresholdMode::Fixed(9).to_string(), "9");
    }

    #[test]
    fn test_builders() {
        let config = DetectorConfig::default()
            .with_threshold(ThresholdMode::Otsu)
            .with_smoothing_iterations(0)
            .with_dilation_iterations(5)
            .with_erosion_iterations(1)
            .with_parallel(true);
        assert_eq!(config.threshold, ThresholdMode::Otsu);
        assert_eq!(config.smoothing_iterations, 0);
        assert_eq!(config.dilation_iterations, 5);
        assert_eq!(config.erosion_iterations, 1);
        assert!(config.parallel);
    }
}
