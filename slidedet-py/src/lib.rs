//! Python bindings for the slidedet detection core.
//!
//! The classifier stays in Python: it is any callable taking
//! `(row, col, size, image)` and returning a float score for accepted windows
//! or `None` for rejected ones. Exceptions raised by the callable abort the
//! scan and propagate unchanged.

use numpy::{PyArray2, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use slidedet::{
    cluster_detections_with_capacity, find_objects, Classifier, DetectError,
    Detection as RustDetection, Detector, DetectorConfig, ImageView, ScanConfig as RustScanConfig,
    SlideDetError, Verdict, Window, DEFAULT_CLUSTER_CAPACITY,
};

/// Convert a SlideDetError to a Python exception.
fn to_py_err(err: SlideDetError) -> PyErr {
    match err {
        SlideDetError::InvalidConfig(_)
        | SlideDetError::InvalidDimensions { .. }
        | SlideDetError::InvalidStride { .. }
        | SlideDetError::CapacityExceeded { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Detection with center, size and score.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    /// Row of the window center.
    #[pyo3(get)]
    pub row: f32,
    /// Column of the window center.
    #[pyo3(get)]
    pub col: f32,
    /// Window side length.
    #[pyo3(get)]
    pub size: f32,
    /// Classifier score, summed over merged windows after clustering.
    #[pyo3(get)]
    pub score: f32,
}

#[pymethods]
impl Detection {
    #[new]
    fn new(row: f32, col: f32, size: f32, score: f32) -> Self {
        Self {
            row,
            col,
            size,
            score,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(row={:.2}, col={:.2}, size={:.2}, score={:.4})",
            self.row, self.col, self.size, self.score
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            row: d.row,
            col: d.col,
            size: d.size,
            score: d.score,
        }
    }
}

impl From<&Detection> for RustDetection {
    fn from(d: &Detection) -> Self {
        RustDetection::new(d.row, d.col, d.size, d.score)
    }
}

/// Configuration for the multiscale window search.
#[pyclass]
#[derive(Clone)]
pub struct ScanConfig {
    inner: RustScanConfig,
}

#[pymethods]
impl ScanConfig {
    /// Create a new ScanConfig.
    ///
    /// Args:
    ///     scale_factor: Ratio between consecutive window sizes (default: 1.1)
    ///     stride_factor: Grid step relative to window size (default: 0.1)
    ///     min_size: Smallest window size in pixels (default: 128)
    ///     max_size: Largest window size in pixels (default: 1024)
    ///     max_detections: Accepted windows kept (default: 2048)
    #[new]
    #[pyo3(signature = (scale_factor=1.1, stride_factor=0.1, min_size=128.0, max_size=1024.0, max_detections=2048))]
    fn new(
        scale_factor: f32,
        stride_factor: f32,
        min_size: f32,
        max_size: f32,
        max_detections: usize,
    ) -> PyResult<Self> {
        let inner = RustScanConfig {
            scale_factor,
            stride_factor,
            min_size,
            max_size,
            max_detections,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Window sizes visited by the search, smallest first.
    fn scales(&self) -> Vec<f32> {
        self.inner.scales().collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScanConfig(scale_factor={}, stride_factor={}, min_size={}, max_size={}, max_detections={})",
            self.inner.scale_factor,
            self.inner.stride_factor,
            self.inner.min_size,
            self.inner.max_size,
            self.inner.max_detections
        )
    }
}

/// Adapts a Python callable to the classifier trait.
struct PyClassifier<'py> {
    callable: Bound<'py, PyAny>,
    image: Bound<'py, PyArray2<u8>>,
}

impl Classifier for PyClassifier<'_> {
    type Error = PyErr;

    fn evaluate(&self, window: Window, _image: ImageView<'_, u8>) -> PyResult<Verdict> {
        let out = self
            .callable
            .call1((window.row, window.col, window.size, &self.image))?;
        let score: Option<f32> = out.extract()?;
        Ok(Verdict::from(score))
    }
}

fn with_classifier<'py, R>(
    image: &PyReadonlyArray2<'py, u8>,
    classifier: &Bound<'py, PyAny>,
    run: impl FnOnce(&PyClassifier<'py>, ImageView<'_, u8>) -> PyResult<R>,
) -> PyResult<R> {
    let shape = image.shape();
    let rows = shape[0];
    let cols = shape[1];
    let data = image.as_slice()?;
    let view = ImageView::from_slice(data, rows, cols).map_err(to_py_err)?;

    let adapter = PyClassifier {
        callable: classifier.clone(),
        image: (**image).clone(),
    };
    run(&adapter, view)
}

/// Scan an image with a Python classifier.
///
/// Args:
///     image: 2D uint8 numpy array (rows x cols), C-contiguous
///     classifier: callable(row, col, size, image) -> float | None
///     config: ScanConfig (default: ScanConfig())
///
/// Returns:
///     List of raw Detection objects in discovery order
#[pyfunction]
#[pyo3(name = "find_objects", signature = (image, classifier, config = None))]
fn find_objects_py<'py>(
    image: PyReadonlyArray2<'py, u8>,
    classifier: &Bound<'py, PyAny>,
    config: Option<ScanConfig>,
) -> PyResult<Vec<Detection>> {
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let raw = with_classifier(&image, classifier, |adapter, view| {
        find_objects(adapter, view, &cfg)
    })?;
    Ok(raw.into_iter().map(Detection::from).collect())
}

/// Merge overlapping detections.
///
/// Args:
///     detections: List of Detection objects
///     capacity: Maximum number of detections accepted (default: 4096)
///
/// Returns:
///     List of clustered Detection objects
#[pyfunction]
#[pyo3(signature = (detections, capacity = DEFAULT_CLUSTER_CAPACITY))]
fn cluster_detections(detections: Vec<Detection>, capacity: usize) -> PyResult<Vec<Detection>> {
    let raw: Vec<RustDetection> = detections.iter().map(RustDetection::from).collect();
    let clustered = cluster_detections_with_capacity(&raw, capacity).map_err(to_py_err)?;
    Ok(clustered.into_iter().map(Detection::from).collect())
}

/// Scan an image and cluster the hits in one call.
///
/// Args:
///     image: 2D uint8 numpy array (rows x cols), C-contiguous
///     classifier: callable(row, col, size, image) -> float | None
///     config: ScanConfig (default: ScanConfig())
///     capacity: Maximum number of raw detections clustered (default: 4096)
#[pyfunction]
#[pyo3(signature = (image, classifier, config = None, capacity = DEFAULT_CLUSTER_CAPACITY))]
fn detect<'py>(
    image: PyReadonlyArray2<'py, u8>,
    classifier: &Bound<'py, PyAny>,
    config: Option<ScanConfig>,
    capacity: usize,
) -> PyResult<Vec<Detection>> {
    let detector = Detector::new(DetectorConfig {
        scan: config.map(|c| c.inner).unwrap_or_default(),
        cluster_capacity: capacity,
    })
    .map_err(to_py_err)?;
    let found = with_classifier(&image, classifier, |adapter, view| {
        detector.detect(adapter, view).map_err(|err| match err {
            DetectError::Classifier(py_err) => py_err,
            DetectError::Pipeline(err) => to_py_err(err),
        })
    })?;
    Ok(found.into_iter().map(Detection::from).collect())
}

/// Load a raw intensity data (.rid) file as a 2D uint8 array.
#[pyfunction]
fn load_rid<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, PyArray2<u8>>> {
    let img = slidedet::load_rid(path).map_err(to_py_err)?;
    let rows: Vec<Vec<u8>> = img
        .data()
        .chunks(img.cols())
        .map(<[u8]>::to_vec)
        .collect();
    PyArray2::from_vec2(py, &rows).map_err(|err| PyRuntimeError::new_err(err.to_string()))
}

/// Python module for slidedet.
#[pymodule]
fn _slidedet(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<ScanConfig>()?;
    m.add_function(wrap_pyfunction!(find_objects_py, m)?)?;
    m.add_function(wrap_pyfunction!(cluster_detections, m)?)?;
    m.add_function(wrap_pyfunction!(detect, m)?)?;
    m.add_function(wrap_pyfunction!(load_rid, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
