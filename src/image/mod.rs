//! Pixel buffers handed to classifiers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the column count represents padded rows or a
//! sub-rectangle of a larger buffer. ROI slices are zero-copy views into the
//! same backing slice and retain the original stride.
//!
//! The detector never interprets samples itself; it only forwards the view to
//! the classifier, so the sample type `T` is left generic.

use crate::util::{SlideDetError, SlideDetResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod rid;

/// Borrowed 2D image view with an explicit stride.
#[derive(Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<T> Clone for ImageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageView<'_, T> {}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == cols`.
    pub fn from_slice(data: &'a [T], rows: usize, cols: usize) -> SlideDetResult<Self> {
        Self::new(data, rows, cols, cols)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], rows: usize, cols: usize, stride: usize) -> SlideDetResult<Self> {
        let needed = required_len(rows, cols, stride)?;
        if data.len() < needed {
            return Err(SlideDetError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the sample at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = row.checked_mul(self.stride)?.checked_add(col)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for `row` with length `cols`.
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.rows {
            return None;
        }
        let start = row.checked_mul(self.stride)?;
        let end = start.checked_add(self.cols)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    ///
    /// `(row, col)` is the top-left corner of the region.
    pub fn roi(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> SlideDetResult<ImageView<'a, T>> {
        if rows == 0 || cols == 0 {
            return Err(SlideDetError::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let out_of_bounds = SlideDetError::RoiOutOfBounds {
            x: col,
            y: row,
            width: cols,
            height: rows,
            img_width: self.cols,
            img_height: self.rows,
        };
        let end_row = row.checked_add(rows).ok_or(out_of_bounds.clone())?;
        let end_col = col.checked_add(cols).ok_or(out_of_bounds.clone())?;
        if end_row > self.rows || end_col > self.cols {
            return Err(out_of_bounds);
        }

        let start = row
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(col))
            .ok_or(SlideDetError::InvalidDimensions {
                width: self.cols,
                height: self.rows,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(SlideDetError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, rows, cols, self.stride)
    }
}

fn required_len(rows: usize, cols: usize, stride: usize) -> SlideDetResult<usize> {
    if rows == 0 || cols == 0 {
        return Err(SlideDetError::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }
    if stride < cols {
        return Err(SlideDetError::InvalidStride {
            width: cols,
            stride,
        });
    }
    (rows - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(cols))
        .ok_or(SlideDetError::InvalidDimensions {
            width: cols,
            height: rows,
        })
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug)]
pub struct OwnedImage {
    data: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `rows * cols` samples.
    pub fn new(data: Vec<u8>, rows: usize, cols: usize) -> SlideDetResult<Self> {
        let needed = required_len(rows, cols, cols)?;
        if data.len() < needed {
            return Err(SlideDetError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SlideDetError::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrows the image as a contiguous view.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
        }
    }
}
