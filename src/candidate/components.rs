//! Connected components of the overlap graph.
//!
//! Two detections are adjacent when their [`overlap`] exceeds
//! [`OVERLAP_THRESHOLD`]. The graph is never materialized: neighbours are
//! found by testing every detection against the node being expanded, so a
//! search costs O(n²) overlap evaluations.

use crate::candidate::overlap::overlap;
use crate::candidate::Detection;

/// Overlap above which two detections belong to the same object.
pub const OVERLAP_THRESHOLD: f32 = 0.3;

/// Component labeling of a detection list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Components {
    labels: Vec<usize>,
    count: usize,
}

impl Components {
    /// Per-detection component ids. Ids are 1-based and contiguous.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Indices of the detections carrying component `id`, in input order.
    pub fn members(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, &label)| label == id)
            .map(|(idx, _)| idx)
    }
}

/// Labels the connected components of the overlap graph.
///
/// Seeds are taken in index order and every unvisited seed opens the next
/// component id, so ids follow the position of each component's first member.
/// The traversal keeps an explicit stack; a neighbour is labeled when it is
/// discovered, which yields the same labels as a recursive depth-first search.
pub fn find_components(detections: &[Detection]) -> Components {
    let n = detections.len();
    let mut labels = vec![0usize; n];
    let mut count = 0usize;
    let mut stack = Vec::new();

    for seed in 0..n {
        if labels[seed] != 0 {
            continue;
        }
        count += 1;
        labels[seed] = count;
        stack.push(seed);

        while let Some(i) = stack.pop() {
            let current = &detections[i];
            for (j, other) in detections.iter().enumerate() {
                if labels[j] == 0 && overlap(current, other) > OVERLAP_THRESHOLD {
                    labels[j] = count;
                    stack.push(j);
                }
            }
        }
    }

    Components { labels, count }
}
