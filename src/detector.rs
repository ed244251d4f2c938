//! Window search followed by clustering, behind one validated configuration.

use crate::candidate::cluster::{cluster_detections_with_capacity, DEFAULT_CLUSTER_CAPACITY};
use crate::candidate::Detection;
use crate::classifier::Classifier;
use crate::image::ImageView;
use crate::search::scan::find_objects;
use crate::search::ScanConfig;
use crate::util::{SlideDetError, SlideDetResult};
use thiserror::Error;

/// Failure of a detection run.
#[derive(Debug, Error)]
pub enum DetectError<E> {
    /// The classifier failed; its error is passed through unchanged.
    #[error("classifier failed: {0}")]
    Classifier(#[source] E),
    /// The pipeline rejected its inputs.
    #[error(transparent)]
    Pipeline(#[from] SlideDetError),
}

/// Configuration for [`Detector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Window search parameters.
    pub scan: ScanConfig,
    /// Most raw detections clustering accepts.
    pub cluster_capacity: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            cluster_capacity: DEFAULT_CLUSTER_CAPACITY,
        }
    }
}

impl DetectorConfig {
    /// Validates the configuration.
    ///
    /// Besides the scan parameters this checks that a full scan can never
    /// hand clustering more detections than it accepts.
    pub fn validate(&self) -> SlideDetResult<()> {
        self.scan.validate()?;
        if self.scan.max_detections > self.cluster_capacity {
            return Err(SlideDetError::InvalidConfig(
                "max_detections must not exceed cluster_capacity",
            ));
        }
        Ok(())
    }
}

/// Multiscale detector around an external classifier.
#[derive(Clone, Debug, Default)]
pub struct Detector {
    cfg: DetectorConfig,
}

impl Detector {
    /// Creates a detector after validating `cfg`.
    pub fn new(cfg: DetectorConfig) -> SlideDetResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Scans `image` and returns the raw accepted windows.
    pub fn detect_raw<T, C>(
        &self,
        classifier: &C,
        image: ImageView<'_, T>,
    ) -> Result<Vec<Detection>, C::Error>
    where
        C: Classifier<T> + ?Sized,
    {
        find_objects(classifier, image, &self.cfg.scan)
    }

    /// Scans `image` and clusters the accepted windows.
    pub fn detect<T, C>(
        &self,
        classifier: &C,
        image: ImageView<'_, T>,
    ) -> Result<Vec<Detection>, DetectError<C::Error>>
    where
        C: Classifier<T> + ?Sized,
    {
        let raw = self
            .detect_raw(classifier, image)
            .map_err(DetectError::Classifier)?;
        let clustered = cluster_detections_with_capacity(&raw, self.cfg.cluster_capacity)?;
        Ok(clustered)
    }
}
