//! Overlap ratio between two square detections.

use crate::candidate::Detection;

/// Length shared by two centered intervals, or 0 when they are disjoint.
#[inline]
fn interval_overlap(center1: f32, size1: f32, center2: f32, size2: f32) -> f32 {
    let hi = (center1 + size1 / 2.0).min(center2 + size2 / 2.0);
    let lo = (center1 - size1 / 2.0).max(center2 - size2 / 2.0);
    (hi - lo).max(0.0)
}

/// Intersection-over-union style ratio of two axis-aligned squares.
///
/// Returns `inter / (a.size² + b.size² - inter)`. The result is 0 when the
/// squares are disjoint on either axis and exactly 1 for identical squares.
/// The formula is symmetric in its arguments.
pub fn overlap(a: &Detection, b: &Detection) -> f32 {
    let over_r = interval_overlap(a.row, a.size, b.row, b.size);
    let over_c = interval_overlap(a.col, a.size, b.col, b.size);
    let inter = over_r * over_c;
    inter / (a.size * a.size + b.size * b.size - inter)
}

#[cfg(test)]
mod tests {
    use super::overlap;
    use crate::candidate::Detection;

    #[test]
    fn half_shifted_squares() {
        let a = Detection::new(10.0, 10.0, 4.0, 1.0);
        let b = Detection::new(10.0, 12.0, 4.0, 1.0);
        // 4x2 intersection over 16 + 16 - 8.
        assert!((overlap(&a, &b) - 8.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn nested_square() {
        let outer = Detection::new(10.0, 10.0, 8.0, 1.0);
        let inner = Detection::new(10.0, 10.0, 4.0, 1.0);
        // 16 / (64 + 16 - 16)
        assert!((overlap(&outer, &inner) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Detection::new(10.0, 10.0, 4.0, 1.0);
        let b = Detection::new(10.0, 14.0, 4.0, 1.0);
        assert_eq!(overlap(&a, &b), 0.0);
    }
}
