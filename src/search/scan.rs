//! Dense multiscale scan driving a classifier.

use crate::candidate::Detection;
use crate::classifier::{Classifier, Verdict};
use crate::image::ImageView;
use crate::search::grid::scan_grid;
use crate::search::ScanConfig;
use crate::trace::{trace_event, trace_span};

/// Runs `classifier` on every window of the multiscale grid and returns the
/// accepted windows.
///
/// Detections come out in discovery order: ascending size, then row-major
/// within a size. Once `cfg.max_detections` windows are held, further
/// acceptances are dropped. An invalid configuration yields no detections and
/// no classifier calls. The first classifier error aborts the scan and is
/// returned unchanged.
pub fn find_objects<T, C>(
    classifier: &C,
    image: ImageView<'_, T>,
    cfg: &ScanConfig,
) -> Result<Vec<Detection>, C::Error>
where
    C: Classifier<T> + ?Sized,
{
    let rows = image.rows();
    let cols = image.cols();
    let _span = trace_span!("scan", rows = rows, cols = cols).entered();

    let mut detections = Vec::new();
    for size in cfg.scales() {
        let step = cfg.step_for(size);
        let mut windows = 0usize;
        let mut accepted = 0usize;
        for window in scan_grid(rows, cols, size, step) {
            windows += 1;
            if let Verdict::Accept(score) = classifier.evaluate(window, image)? {
                accepted += 1;
                if detections.len() < cfg.max_detections {
                    detections.push(Detection::from_window(window, score));
                }
            }
        }
        trace_event!(
            "scale_pass",
            size = size,
            step = step,
            windows = windows,
            accepted = accepted
        );
    }

    trace_event!("scan_done", detections = detections.len());
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::find_objects;
    use crate::classifier::{Verdict, Window};
    use crate::image::ImageView;
    use crate::search::ScanConfig;

    fn accept_all(_w: Window, _img: ImageView<'_, u8>) -> Verdict {
        Verdict::Accept(1.0)
    }

    fn accept_left_half(w: Window, img: ImageView<'_, u8>) -> Verdict {
        if w.col < img.cols() as f32 / 2.0 {
            Verdict::Accept(w.col)
        } else {
            Verdict::Reject
        }
    }

    #[test]
    fn single_scale_visits_grid() {
        let data = vec![0u8; 20 * 20];
        let view = ImageView::from_slice(&data, 20, 20).unwrap();
        let cfg = ScanConfig {
            scale_factor: 2.0,
            stride_factor: 1.0,
            min_size: 4.0,
            max_size: 4.0,
            max_detections: 100,
        };
        let dets = find_objects(&accept_all, view, &cfg).unwrap();
        assert_eq!(dets.len(), 16);
        assert_eq!((dets[0].row, dets[0].col, dets[0].size), (3.0, 3.0, 4.0));
        assert_eq!((dets[15].row, dets[15].col), (15.0, 15.0));
    }

    #[test]
    fn rejected_windows_are_not_reported() {
        let data = vec![0u8; 20 * 20];
        let view = ImageView::from_slice(&data, 20, 20).unwrap();
        let cfg = ScanConfig {
            scale_factor: 2.0,
            stride_factor: 1.0,
            min_size: 4.0,
            max_size: 4.0,
            max_detections: 100,
        };
        let dets = find_objects(&accept_left_half, view, &cfg).unwrap();
        // Columns 3 and 7 lie left of 10.
        assert_eq!(dets.len(), 8);
        assert!(dets.iter().all(|d| d.score == d.col));
    }
}
