//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{SlideDetError, SlideDetResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> SlideDetResult<ImageView<'_, u8>> {
    let rows = img.height() as usize;
    let cols = img.width() as usize;
    ImageView::from_slice(img.as_raw(), rows, cols)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> SlideDetResult<OwnedImage> {
    let rows = img.height() as usize;
    let cols = img.width() as usize;
    OwnedImage::new(img.as_raw().clone(), rows, cols)
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SlideDetResult<OwnedImage> {
    let gray = img.to_luma8();
    owned_from_gray_image(&gray)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SlideDetResult<OwnedImage> {
    let img = image::open(path).map_err(|err| SlideDetError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

#[cfg(test)]
mod tests {
    use super::{owned_from_gray_image, view_from_gray_image};

    #[test]
    fn gray_image_maps_width_to_cols() {
        let img = image::GrayImage::from_fn(3, 2, |x, y| image::Luma([(y * 3 + x) as u8]));
        let view = view_from_gray_image(&img).unwrap();
        assert_eq!(view.rows(), 2);
        assert_eq!(view.cols(), 3);
        assert_eq!(view.get(1, 2).copied(), Some(5));

        let owned = owned_from_gray_image(&img).unwrap();
        assert_eq!(owned.data(), &[0u8, 1, 2, 3, 4, 5]);
    }
}
