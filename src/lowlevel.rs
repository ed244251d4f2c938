//! Low-level building blocks for custom detection pipelines.
//!
//! These expose the component labeling and grid helpers used internally by
//! [`crate::find_objects`] and [`crate::cluster_detections`], for callers that
//! want to inspect clusters or drive their own scan loop. Most users should
//! prefer the top-level `Detector` type.

pub use crate::candidate::components::{find_components, Components, OVERLAP_THRESHOLD};
pub use crate::candidate::overlap::overlap;
pub use crate::search::grid::{axis_positions, scan_grid};
