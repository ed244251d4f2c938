//! The seam between the window search and the decision procedure.
//!
//! The scanner does not know how a window is judged. It hands every candidate
//! [`Window`] plus the borrowed image to a [`Classifier`] and trusts the
//! returned [`Verdict`]. Any closure `Fn(Window, ImageView<T>) -> Verdict` is a
//! classifier; closures that can fail are wrapped in [`FallibleFn`].

use crate::image::ImageView;
use std::convert::Infallible;

/// A square candidate window centered at `(row, col)` with side `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// Row coordinate of the window center.
    pub row: f32,
    /// Column coordinate of the window center.
    pub col: f32,
    /// Side length of the square.
    pub size: f32,
}

impl Window {
    /// Creates a window from its center and side length.
    pub fn new(row: f32, col: f32, size: f32) -> Self {
        Self { row, col, size }
    }

    /// Row of the top edge.
    pub fn top(&self) -> f32 {
        self.row - self.size / 2.0
    }

    /// Column of the left edge.
    pub fn left(&self) -> f32 {
        self.col - self.size / 2.0
    }

    /// Returns `true` when the whole square lies inside a `rows x cols` image.
    pub fn contains_in(&self, rows: usize, cols: usize) -> bool {
        let half = self.size / 2.0;
        self.row - half >= 0.0
            && self.col - half >= 0.0
            && self.row + half <= rows as f32
            && self.col + half <= cols as f32
    }

    /// Center and size truncated toward zero, as integer pixel classifiers
    /// expect them.
    pub fn pixel_coords(&self) -> (usize, usize, usize) {
        (
            self.row.max(0.0) as usize,
            self.col.max(0.0) as usize,
            self.size.max(0.0) as usize,
        )
    }
}

/// Outcome of evaluating one window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// The window contains the object; carries the confidence score.
    Accept(f32),
    /// The window was rejected.
    Reject,
}

impl Verdict {
    /// Returns the score of an accepted window.
    pub fn score(self) -> Option<f32> {
        match self {
            Verdict::Accept(score) => Some(score),
            Verdict::Reject => None,
        }
    }

    /// Returns `true` for [`Verdict::Accept`].
    pub fn is_accept(self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

impl From<Option<f32>> for Verdict {
    fn from(value: Option<f32>) -> Self {
        value.map_or(Verdict::Reject, Verdict::Accept)
    }
}

/// Decision procedure evaluated once per candidate window.
///
/// Implementations may read any pixels of `image`; the scanner only promises
/// that `window` lies fully inside it.
pub trait Classifier<T = u8> {
    /// Error raised by the classifier. The scanner forwards it unchanged.
    type Error;

    /// Judges a single window.
    fn evaluate(&self, window: Window, image: ImageView<'_, T>) -> Result<Verdict, Self::Error>;
}

impl<T, F> Classifier<T> for F
where
    F: Fn(Window, ImageView<'_, T>) -> Verdict,
{
    type Error = Infallible;

    #[inline]
    fn evaluate(&self, window: Window, image: ImageView<'_, T>) -> Result<Verdict, Infallible> {
        Ok(self(window, image))
    }
}

/// Adapts a closure returning `Result<Verdict, E>` into a [`Classifier`].
#[derive(Clone, Copy, Debug)]
pub struct FallibleFn<F>(pub F);

impl<T, E, F> Classifier<T> for FallibleFn<F>
where
    F: Fn(Window, ImageView<'_, T>) -> Result<Verdict, E>,
{
    type Error = E;

    #[inline]
    fn evaluate(&self, window: Window, image: ImageView<'_, T>) -> Result<Verdict, E> {
        (self.0)(window, image)
    }
}

#[cfg(test)]
mod tests {
    use super::{Classifier, FallibleFn, Verdict, Window};
    use crate::image::ImageView;

    #[test]
    fn window_edges_and_containment() {
        let w = Window::new(5.0, 6.0, 4.0);
        assert_eq!(w.top(), 3.0);
        assert_eq!(w.left(), 4.0);
        assert!(w.contains_in(7, 8));
        assert!(!w.contains_in(6, 8));
        assert_eq!(Window::new(3.7, 2.2, 4.9).pixel_coords(), (3, 2, 4));
    }

    fn bright(w: Window, img: ImageView<'_, u8>) -> Verdict {
        let (r, c, _) = w.pixel_coords();
        match img.get(r, c) {
            Some(&v) if v > 5 => Verdict::Accept(f32::from(v)),
            _ => Verdict::Reject,
        }
    }

    fn unloaded(_w: Window, _img: ImageView<'_, u8>) -> Result<Verdict, &'static str> {
        Err("model not loaded")
    }

    #[test]
    fn functions_are_classifiers() {
        let data = [7u8; 16];
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let verdict = bright.evaluate(Window::new(1.0, 1.0, 2.0), view).unwrap();
        assert_eq!(verdict.score(), Some(7.0));
    }

    #[test]
    fn fallible_function_surfaces_error() {
        let data = [0u8; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let failing = FallibleFn(unloaded);
        assert_eq!(
            failing.evaluate(Window::new(1.0, 1.0, 1.0), view),
            Err("model not loaded")
        );
    }

    #[test]
    fn verdict_from_option() {
        assert_eq!(Verdict::from(Some(2.5)), Verdict::Accept(2.5));
        assert!(!Verdict::from(None).is_accept());
    }
}
