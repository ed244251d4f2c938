//! slidedet is the search and consolidation stage of a sliding-window object
//! detector.
//!
//! A [`Classifier`] supplied by the caller judges square windows. The crate
//! scans an image with windows of geometrically growing size on a regular grid
//! of centers ([`find_objects`]), then merges overlapping hits into one
//! averaged detection per object ([`cluster_detections`]). [`Detector`] runs
//! both stages with one validated configuration.
//!
//! Decoding common image formats is available with the `image-io` feature;
//! spans and per-scale events are emitted with the `tracing` feature.

mod candidate;
pub mod classifier;
mod detector;
pub mod image;
pub mod lowlevel;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use candidate::cluster::{
    cluster_detections, cluster_detections_in_place, cluster_detections_with_capacity,
    DEFAULT_CLUSTER_CAPACITY,
};
pub use candidate::overlap::overlap;
pub use candidate::Detection;
pub use classifier::{Classifier, FallibleFn, Verdict, Window};
pub use detector::{DetectError, Detector, DetectorConfig};
pub use crate::image::rid::{decode_rid, encode_rid, load_rid};
pub use crate::image::{ImageView, OwnedImage};
pub use search::grid::{ScaleLevel, ScanPlan};
pub use search::scan::find_objects;
pub use search::ScanConfig;
pub use util::{SlideDetError, SlideDetResult};
