//! Raw intensity data (RID) files.
//!
//! A RID file is a little-endian `i32` width, a little-endian `i32` height and
//! then `width * height` unsigned bytes in row-major order. It is the format
//! the sample preparation tooling writes, so detections can be run on those
//! crops without an image decoder.

use crate::image::{ImageView, OwnedImage};
use crate::util::{SlideDetError, SlideDetResult};
use std::path::Path;

const HEADER_LEN: usize = 8;

/// Decodes a RID buffer into an owned grayscale image.
pub fn decode_rid(bytes: &[u8]) -> SlideDetResult<OwnedImage> {
    if bytes.len() < HEADER_LEN {
        return Err(SlideDetError::InvalidRid {
            reason: "missing header",
        });
    }
    let width = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let height = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if width <= 0 || height <= 0 {
        return Err(SlideDetError::InvalidRid {
            reason: "non-positive dimensions",
        });
    }

    let cols = width as usize;
    let rows = height as usize;
    let needed = rows
        .checked_mul(cols)
        .ok_or(SlideDetError::InvalidDimensions {
            width: cols,
            height: rows,
        })?;
    let payload = &bytes[HEADER_LEN..];
    if payload.len() < needed {
        return Err(SlideDetError::InvalidRid {
            reason: "truncated pixel data",
        });
    }
    if payload.len() > needed {
        return Err(SlideDetError::InvalidRid {
            reason: "trailing bytes after pixel data",
        });
    }

    OwnedImage::new(payload.to_vec(), rows, cols)
}

/// Encodes a view as a RID buffer, dropping any row padding.
pub fn encode_rid(view: ImageView<'_, u8>) -> SlideDetResult<Vec<u8>> {
    let width = i32::try_from(view.cols()).map_err(|_| SlideDetError::InvalidDimensions {
        width: view.cols(),
        height: view.rows(),
    })?;
    let height = i32::try_from(view.rows()).map_err(|_| SlideDetError::InvalidDimensions {
        width: view.cols(),
        height: view.rows(),
    })?;

    let mut out = Vec::with_capacity(HEADER_LEN + view.rows() * view.cols());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    for r in 0..view.rows() {
        let row = view.row(r).ok_or(SlideDetError::BufferTooSmall {
            needed: (r + 1) * view.stride(),
            got: view.as_slice().len(),
        })?;
        out.extend_from_slice(row);
    }
    Ok(out)
}

/// Reads and decodes a RID file from disk.
pub fn load_rid<P: AsRef<Path>>(path: P) -> SlideDetResult<OwnedImage> {
    let bytes = std::fs::read(path).map_err(|err| SlideDetError::Io {
        reason: err.to_string(),
    })?;
    decode_rid(&bytes)
}
