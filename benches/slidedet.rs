use criterion::{criterion_group, criterion_main, Criterion};
use slidedet::{
    cluster_detections, find_objects, Detection, Detector, DetectorConfig, ImageView, ScanConfig,
    Verdict, Window,
};
use std::hint::black_box;

fn make_image(rows: usize, cols: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let value = ((c * 13) ^ (r * 7) ^ (c * r)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

/// Cheap pixel-comparison test standing in for a real cascade.
fn pixel_pair(w: Window, img: ImageView<'_, u8>) -> Verdict {
    let (r, c, s) = w.pixel_coords();
    let q = s / 4;
    let a = img.get(r - q, c).copied().unwrap_or(0);
    let b = img.get(r + q, c).copied().unwrap_or(0);
    if a > b.saturating_add(64) {
        Verdict::Accept(f32::from(a - b) / 255.0)
    } else {
        Verdict::Reject
    }
}

fn bench_scan(c: &mut Criterion) {
    let rows = 480;
    let cols = 640;
    let image = make_image(rows, cols);
    let view = ImageView::from_slice(&image, rows, cols).unwrap();
    let cfg = ScanConfig {
        min_size: 48.0,
        max_size: 400.0,
        ..ScanConfig::default()
    };

    c.bench_function("scan_640x480_pixel_pair", |b| {
        b.iter(|| black_box(find_objects(&pixel_pair, view, &cfg).unwrap()));
    });

    let detector = Detector::new(DetectorConfig {
        scan: cfg,
        ..DetectorConfig::default()
    })
    .unwrap();
    c.bench_function("detect_640x480_pixel_pair", |b| {
        b.iter(|| black_box(detector.detect(&pixel_pair, view).unwrap()));
    });
}

fn bench_cluster(c: &mut Criterion) {
    // Dense blobs of hits, similar to what a permissive cascade produces.
    let mut raw = Vec::new();
    for blob in 0..16 {
        let base_r = 40.0 + 60.0 * (blob / 4) as f32;
        let base_c = 40.0 + 60.0 * (blob % 4) as f32;
        for k in 0..64 {
            let dr = (k / 8) as f32;
            let dc = (k % 8) as f32;
            raw.push(Detection::new(base_r + dr, base_c + dc, 24.0 + dr, 1.0));
        }
    }

    c.bench_function("cluster_1024_in_16_blobs", |b| {
        b.iter(|| black_box(cluster_detections(black_box(&raw)).unwrap()));
    });
}

criterion_group!(benches, bench_scan, bench_cluster);
criterion_main!(benches);
