//! Multiscale sliding-window search.
//!
//! The search walks a geometric progression of window sizes and, for each
//! size, a regular grid of window centers. Scale is simulated by growing the
//! window; the image itself is never resized.

pub(crate) mod grid;
pub(crate) mod scan;

use crate::util::{SlideDetError, SlideDetResult};

/// Configuration for the window search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanConfig {
    /// Ratio between consecutive window sizes (must exceed 1).
    pub scale_factor: f32,
    /// Grid step as a fraction of the window size (must be positive).
    pub stride_factor: f32,
    /// Smallest window size in pixels.
    pub min_size: f32,
    /// Largest window size in pixels.
    pub max_size: f32,
    /// Accepted windows kept; later acceptances are dropped.
    pub max_detections: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            stride_factor: 0.1,
            min_size: 128.0,
            max_size: 1024.0,
            max_detections: 2048,
        }
    }
}

impl ScanConfig {
    /// Validates the configuration.
    ///
    /// The scanner itself never fails on a bad configuration; it simply finds
    /// nothing. Call this to get a diagnostic instead.
    pub fn validate(&self) -> SlideDetResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 1.0 {
            return Err(SlideDetError::InvalidConfig(
                "scale_factor must be finite and > 1",
            ));
        }
        if !self.stride_factor.is_finite() || self.stride_factor <= 0.0 {
            return Err(SlideDetError::InvalidConfig(
                "stride_factor must be finite and > 0",
            ));
        }
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(SlideDetError::InvalidConfig(
                "min_size must be finite and > 0",
            ));
        }
        if !self.max_size.is_finite() || self.max_size < self.min_size {
            return Err(SlideDetError::InvalidConfig(
                "max_size must be finite and >= min_size",
            ));
        }
        Ok(())
    }

    /// Window sizes visited by the search, smallest first.
    ///
    /// Empty when the configuration is invalid.
    pub fn scales(&self) -> impl Iterator<Item = f32> {
        let scale_factor = self.scale_factor;
        let max_size = self.max_size;
        let first = self.validate().ok().map(|_| self.min_size);
        std::iter::successors(first, move |&size| Some(size * scale_factor))
            .take_while(move |&size| size <= max_size)
    }

    /// Grid step used at window size `size`.
    pub fn step_for(&self, size: f32) -> f32 {
        (self.stride_factor * size).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ScanConfig;

    #[test]
    fn scales_form_geometric_progression() {
        let cfg = ScanConfig {
            scale_factor: 2.0,
            min_size: 10.0,
            max_size: 80.0,
            ..ScanConfig::default()
        };
        let scales: Vec<f32> = cfg.scales().collect();
        assert_eq!(scales, vec![10.0, 20.0, 40.0, 80.0]);
    }

    #[test]
    fn invalid_config_has_no_scales() {
        for cfg in [
            ScanConfig {
                scale_factor: 1.0,
                ..ScanConfig::default()
            },
            ScanConfig {
                stride_factor: 0.0,
                ..ScanConfig::default()
            },
            ScanConfig {
                min_size: 64.0,
                max_size: 32.0,
                ..ScanConfig::default()
            },
            ScanConfig {
                min_size: f32::NAN,
                ..ScanConfig::default()
            },
        ] {
            assert!(cfg.validate().is_err());
            assert_eq!(cfg.scales().count(), 0);
        }
    }

    #[test]
    fn step_never_drops_below_one_pixel() {
        let cfg = ScanConfig {
            stride_factor: 0.05,
            ..ScanConfig::default()
        };
        assert_eq!(cfg.step_for(10.0), 1.0);
        assert_eq!(cfg.step_for(100.0), 5.0);
    }
}
