use clap::Parser;
use serde::{Deserialize, Serialize};
use slidedet::io::load_gray_image;
use slidedet::{
    cluster_detections_with_capacity, load_rid, Detection, DetectorConfig, OwnedImage,
    ScaleLevel, ScanConfig, ScanPlan, DEFAULT_CLUSTER_CAPACITY,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "slidedet CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScanConfigJson {
    scale_factor: f32,
    stride_factor: f32,
    min_size: f32,
    max_size: f32,
    max_detections: usize,
}

impl Default for ScanConfigJson {
    fn default() -> Self {
        let cfg = ScanConfig::default();
        Self {
            scale_factor: cfg.scale_factor,
            stride_factor: cfg.stride_factor,
            min_size: cfg.min_size,
            max_size: cfg.max_size,
            max_detections: cfg.max_detections,
        }
    }
}

impl From<ScanConfigJson> for ScanConfig {
    fn from(value: ScanConfigJson) -> Self {
        Self {
            scale_factor: value.scale_factor,
            stride_factor: value.stride_factor,
            min_size: value.min_size,
            max_size: value.max_size,
            max_detections: value.max_detections,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    rows: usize,
    cols: usize,
    detections_path: Option<String>,
    output_path: Option<String>,
    cluster_capacity: usize,
    scan: ScanConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            rows: 0,
            cols: 0,
            detections_path: None,
            output_path: None,
            cluster_capacity: DEFAULT_CLUSTER_CAPACITY,
            scan: ScanConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DetectionRecord {
    row: f32,
    col: f32,
    size: f32,
    score: f32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            row: value.row,
            col: value.col,
            size: value.size,
            score: value.score,
        }
    }
}

impl From<DetectionRecord> for Detection {
    fn from(value: DetectionRecord) -> Self {
        Detection::new(value.row, value.col, value.size, value.score)
    }
}

#[derive(Debug, Serialize)]
struct LevelRecord {
    size: f32,
    step: f32,
    grid_rows: usize,
    grid_cols: usize,
    windows: usize,
}

impl From<&ScaleLevel> for LevelRecord {
    fn from(value: &ScaleLevel) -> Self {
        Self {
            size: value.size,
            step: value.step,
            grid_rows: value.grid_rows,
            grid_cols: value.grid_cols,
            windows: value.windows(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    rows: usize,
    cols: usize,
    total_windows: usize,
    levels: Vec<LevelRecord>,
    raw_count: Option<usize>,
    detections: Vec<DetectionRecord>,
}

fn load_image(path: &str) -> Result<OwnedImage, Box<dyn std::error::Error>> {
    let is_rid = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rid"));
    let image = if is_rid {
        load_rid(path)?
    } else {
        load_gray_image(path)?
    };
    Ok(image)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("slidedet=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    let detector_cfg = DetectorConfig {
        scan: config.scan.into(),
        cluster_capacity: config.cluster_capacity,
    };
    detector_cfg.validate()?;

    let (rows, cols) = if config.image_path.is_empty() {
        (config.rows, config.cols)
    } else {
        let image = load_image(&config.image_path)?;
        (image.rows(), image.cols())
    };
    if rows == 0 || cols == 0 {
        return Err("set image_path or non-zero rows and cols in the config".into());
    }

    let plan = ScanPlan::new(rows, cols, &detector_cfg.scan);
    tracing::info!(
        rows,
        cols,
        scales = plan.levels().len(),
        windows = plan.total_windows(),
        "planned scan"
    );

    let (raw_count, detections) = match &config.detections_path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let records: Vec<DetectionRecord> = serde_json::from_str(&text)?;
            let raw: Vec<Detection> = records.into_iter().map(Detection::from).collect();
            let clustered = cluster_detections_with_capacity(&raw, detector_cfg.cluster_capacity)?;
            (Some(raw.len()), clustered)
        }
        None => (None, Vec::new()),
    };

    let output = Output {
        rows,
        cols,
        total_windows: plan.total_windows(),
        levels: plan.levels().iter().map(LevelRecord::from).collect(),
        raw_count,
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
