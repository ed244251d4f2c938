//! Window center grids and scan planning.
//!
//! For a window of side `size` the centers along an axis of length `len` run
//! from `size/2 + 1` up to `len - size/2 - 1` inclusive, so every scanned
//! window lies inside the image. Positions are accumulated by repeated
//! addition of the step.

use crate::classifier::Window;
use crate::search::ScanConfig;

/// Centers along one axis of length `len` for windows of side `size`.
pub fn axis_positions(len: usize, size: f32, step: f32) -> impl Iterator<Item = f32> {
    let first = size / 2.0 + 1.0;
    let last = len as f32 - size / 2.0 - 1.0;
    let start = (step > 0.0).then_some(first);
    std::iter::successors(start, move |&pos| Some(pos + step)).take_while(move |&pos| pos <= last)
}

/// Windows of side `size` on a `rows x cols` image, in row-major order.
pub fn scan_grid(rows: usize, cols: usize, size: f32, step: f32) -> impl Iterator<Item = Window> {
    axis_positions(rows, size, step).flat_map(move |row| {
        axis_positions(cols, size, step).map(move |col| Window::new(row, col, size))
    })
}

/// Grid summary for one window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLevel {
    /// Window side length.
    pub size: f32,
    /// Distance between neighbouring centers.
    pub step: f32,
    /// Number of center rows.
    pub grid_rows: usize,
    /// Number of center columns.
    pub grid_cols: usize,
}

impl ScaleLevel {
    /// Number of windows evaluated at this size.
    pub fn windows(&self) -> usize {
        self.grid_rows * self.grid_cols
    }
}

/// The scales and grids a search would visit, computed without a classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanPlan {
    levels: Vec<ScaleLevel>,
}

impl ScanPlan {
    /// Plans a search over a `rows x cols` image.
    pub fn new(rows: usize, cols: usize, cfg: &ScanConfig) -> Self {
        let levels = cfg
            .scales()
            .map(|size| {
                let step = cfg.step_for(size);
                ScaleLevel {
                    size,
                    step,
                    grid_rows: axis_positions(rows, size, step).count(),
                    grid_cols: axis_positions(cols, size, step).count(),
                }
            })
            .collect();
        Self { levels }
    }

    /// Per-scale grid summaries, smallest size first.
    pub fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    /// Total number of classifier calls the search would make.
    pub fn total_windows(&self) -> usize {
        self.levels.iter().map(ScaleLevel::windows).sum()
    }
}
