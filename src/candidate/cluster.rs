//! Collapses overlapping raw detections into one detection per object.

use crate::candidate::components::{find_components, Components};
use crate::candidate::Detection;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{SlideDetError, SlideDetResult};

/// Largest number of raw detections clustered by default.
pub const DEFAULT_CLUSTER_CAPACITY: usize = 4096;

/// Clusters raw detections using [`DEFAULT_CLUSTER_CAPACITY`].
pub fn cluster_detections(detections: &[Detection]) -> SlideDetResult<Vec<Detection>> {
    cluster_detections_with_capacity(detections, DEFAULT_CLUSTER_CAPACITY)
}

/// Clusters raw detections into one averaged detection per connected
/// component of the overlap graph.
///
/// Each output detection carries the mean row, column and size of its members
/// and the sum of their scores. Outputs are ordered by component id, which is
/// the order in which each component's first member appears in the input.
/// Inputs longer than `capacity` are rejected.
pub fn cluster_detections_with_capacity(
    detections: &[Detection],
    capacity: usize,
) -> SlideDetResult<Vec<Detection>> {
    if detections.len() > capacity {
        return Err(SlideDetError::CapacityExceeded {
            count: detections.len(),
            capacity,
        });
    }

    let _span = trace_span!("cluster", raw = detections.len()).entered();
    let components = find_components(detections);
    let clustered = aggregate(detections, &components);
    trace_event!(
        "clustered",
        raw = detections.len(),
        clusters = clustered.len()
    );
    Ok(clustered)
}

/// Clusters `detections` in place and returns the number of clusters left.
///
/// On error the vector is left untouched.
pub fn cluster_detections_in_place(
    detections: &mut Vec<Detection>,
    capacity: usize,
) -> SlideDetResult<usize> {
    let clustered = cluster_detections_with_capacity(detections, capacity)?;
    let count = clustered.len();
    detections[..count].copy_from_slice(&clustered);
    detections.truncate(count);
    Ok(count)
}

#[derive(Clone, Copy, Default)]
struct Accumulator {
    row: f32,
    col: f32,
    size: f32,
    score: f32,
    members: usize,
}

fn aggregate(detections: &[Detection], components: &Components) -> Vec<Detection> {
    if components.count() == 0 {
        return Vec::new();
    }

    // Members are summed in input order, per component.
    let mut sums = vec![Accumulator::default(); components.count()];
    for (det, &label) in detections.iter().zip(components.labels()) {
        let acc = &mut sums[label - 1];
        acc.row += det.row;
        acc.col += det.col;
        acc.size += det.size;
        acc.score += det.score;
        acc.members += 1;
    }

    sums.into_iter()
        .enumerate()
        .map(|(idx, acc)| {
            trace_debug!(
                "component",
                id = idx + 1,
                members = acc.members,
                score = acc.score
            );
            let k = acc.members as f32;
            Detection::new(acc.row / k, acc.col / k, acc.size / k, acc.score)
        })
        .collect()
}
