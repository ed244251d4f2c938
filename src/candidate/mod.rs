//! Raw detections and their consolidation.
//!
//! Overlapping hits from the window search are linked into connected
//! components and each component is collapsed into one averaged detection.

pub(crate) mod cluster;
pub(crate) mod components;
pub(crate) mod overlap;

use crate::classifier::Window;

/// A square detection centered at `(row, col)` with side `size`.
///
/// After the window search `score` is the classifier margin of one window;
/// after clustering it is the sum over the merged windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Row coordinate of the center.
    pub row: f32,
    /// Column coordinate of the center.
    pub col: f32,
    /// Side length of the square.
    pub size: f32,
    /// Confidence score.
    pub score: f32,
}

impl Detection {
    /// Creates a detection from its center, size and score.
    pub fn new(row: f32, col: f32, size: f32, score: f32) -> Self {
        Self {
            row,
            col,
            size,
            score,
        }
    }

    /// Creates a detection for an accepted window.
    pub fn from_window(window: Window, score: f32) -> Self {
        Self::new(window.row, window.col, window.size, score)
    }

    /// Returns the square this detection covers.
    pub fn window(&self) -> Window {
        Window::new(self.row, self.col, self.size)
    }
}
