use slidedet::lowlevel::{find_components, overlap, OVERLAP_THRESHOLD};
use slidedet::{
    cluster_detections, cluster_detections_with_capacity, Detection, SlideDetError,
    DEFAULT_CLUSTER_CAPACITY,
};

#[test]
fn empty_input_clusters_to_nothing() {
    assert!(cluster_detections(&[]).unwrap().is_empty());
}

#[test]
fn non_overlapping_detections_pass_through() {
    let dets: Vec<Detection> = (0..6)
        .map(|i| Detection::new(20.0 * i as f32, 15.0, 10.0, 0.25 * i as f32))
        .collect();
    for (i, a) in dets.iter().enumerate() {
        for b in &dets[i + 1..] {
            assert_eq!(overlap(a, b), 0.0);
        }
    }

    let out = cluster_detections(&dets).unwrap();
    assert_eq!(out, dets);
}

#[test]
fn bridge_detection_joins_its_neighbours() {
    let a = Detection::new(50.0, 10.0, 10.0, 1.0);
    let b = Detection::new(50.0, 14.0, 10.0, 2.0);
    let c = Detection::new(50.0, 18.0, 10.0, 3.0);
    assert!(overlap(&a, &b) > OVERLAP_THRESHOLD);
    assert!(overlap(&b, &c) > OVERLAP_THRESHOLD);
    assert!(overlap(&a, &c) <= OVERLAP_THRESHOLD);

    // The bridge comes last so a single pairwise pass from `a` would miss `c`.
    let dets = [a, c, b];
    let comps = find_components(&dets);
    assert_eq!(comps.count(), 1);
    assert_eq!(comps.labels(), &[1, 1, 1]);

    let out = cluster_detections(&dets).unwrap();
    assert_eq!(out, vec![Detection::new(50.0, 14.0, 10.0, 6.0)]);
}

#[test]
fn threshold_is_strict() {
    // Shifted so that overlap lands just below and just above 0.3.
    let base = Detection::new(0.0, 0.0, 10.0, 1.0);
    let below = Detection::new(0.0, 5.5, 10.0, 1.0);
    let above = Detection::new(0.0, 5.0, 10.0, 1.0);
    assert!(overlap(&base, &below) < OVERLAP_THRESHOLD);
    assert!(overlap(&base, &above) > OVERLAP_THRESHOLD);

    assert_eq!(cluster_detections(&[base, below]).unwrap().len(), 2);
    assert_eq!(cluster_detections(&[base, above]).unwrap().len(), 1);
}

#[test]
fn clusters_follow_first_appearance() {
    let dets = [
        Detection::new(80.0, 80.0, 12.0, 1.0),
        Detection::new(10.0, 10.0, 12.0, 1.0),
        Detection::new(81.0, 80.0, 12.0, 1.0),
        Detection::new(11.0, 10.0, 12.0, 1.0),
        Detection::new(12.0, 10.0, 12.0, 1.0),
    ];
    let out = cluster_detections(&dets).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], Detection::new(80.5, 80.0, 12.0, 2.0));
    assert_eq!(out[1], Detection::new(11.0, 10.0, 12.0, 3.0));
}

#[test]
fn capacity_is_enforced() {
    let dets = vec![Detection::new(0.0, 0.0, 4.0, 1.0); DEFAULT_CLUSTER_CAPACITY + 1];
    let err = cluster_detections(&dets).unwrap_err();
    assert_eq!(
        err,
        SlideDetError::CapacityExceeded {
            count: DEFAULT_CLUSTER_CAPACITY + 1,
            capacity: DEFAULT_CLUSTER_CAPACITY,
        }
    );

    let ok = cluster_detections_with_capacity(&dets[..3], 3).unwrap();
    assert_eq!(ok, vec![Detection::new(0.0, 0.0, 4.0, 3.0)]);
}

#[test]
fn full_capacity_is_accepted() {
    // A diagonal chain of 4096 mutually distant detections.
    let dets: Vec<Detection> = (0..DEFAULT_CLUSTER_CAPACITY)
        .map(|i| Detection::new(i as f32 * 10.0, 0.0, 2.0, 1.0))
        .collect();
    let out = cluster_detections(&dets).unwrap();
    assert_eq!(out.len(), DEFAULT_CLUSTER_CAPACITY);
}

#[test]
fn long_chain_forms_one_component() {
    // Every detection overlaps its successor, so the whole chain is one
    // component reached through a deep traversal.
    let n = 3000;
    let dets: Vec<Detection> = (0..n)
        .map(|i| Detection::new(0.0, i as f32 * 2.0, 10.0, 1.0))
        .collect();
    let out = cluster_detections(&dets).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, n as f32);
    assert_eq!(out[0].size, 10.0);
}
