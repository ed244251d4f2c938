//! Error types for slidedet.

use thiserror::Error;

/// Result alias for slidedet operations.
pub type SlideDetResult<T> = std::result::Result<T, SlideDetError>;

/// Errors that can occur when building inputs for or running the detector.
///
/// Classifier failures are not represented here; they travel through the
/// classifier's own error type (see [`crate::DetectError`]).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SlideDetError {
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) is out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// More raw detections were handed to clustering than it can label.
    #[error("{count} detections exceed cluster capacity {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
    /// A raw intensity data buffer is malformed.
    #[error("invalid rid data: {reason}")]
    InvalidRid { reason: &'static str },
    /// Reading from disk failed.
    #[error("io error: {reason}")]
    Io { reason: String },
    /// Decoding an image through the `image` crate failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
