use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flexi_logger::Logger;
use qr_locate::tools::{grid_stats, load_raster, save_annotated, save_stages};
use qr_locate::{ColorRaster, DetectError, Detector, DetectorConfig, ThresholdMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Exit status when the image is valid but holds no candidate region
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "qrlocate", version, about = "Locate the QR code region in an image")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the bounding box of the QR code region
    Detect {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Write every intermediate stage as a PNG
    Stages {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Save a copy of the image with the detected box outlined
    Annotate {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Outline thickness in pixels
        #[arg(long, default_value_t = 3)]
        line_width: u32,
        #[command(flatten)]
        tuning: Tuning,
    },
}

/// Pipeline overrides, applied on top of the QR_* environment
#[derive(Args)]
struct Tuning {
    /// Binarization cut-off (1-255) or "otsu"
    #[arg(long)]
    threshold: Option<ThresholdMode>,
    /// Box-averaging passes over the gradient map
    #[arg(long)]
    smoothing: Option<usize>,
    /// Dilations in the closing step
    #[arg(long)]
    dilations: Option<usize>,
    /// Erosions in the closing step
    #[arg(long)]
    erosions: Option<usize>,
    /// Skip the greyscale contrast stretch
    #[arg(long)]
    no_stretch: bool,
    /// Filter rows on the rayon thread pool
    #[arg(long)]
    parallel: bool,
}

impl Tuning {
    fn config(&self) -> DetectorConfig {
        let mut config = DetectorConfig::from_env();
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        if let Some(n) = self.smoothing {
            config = config.with_smoothing_iterations(n);
        }
        if let Some(n) = self.dilations {
            config = config.with_dilation_iterations(n);
        }
        if let Some(n) = self.erosions {
            config = config.with_erosion_iterations(n);
        }
        if self.no_stretch {
            config = config.with_stretch_contrast(false);
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let _logger = match Logger::try_with_env_or_str(level).and_then(|l| l.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to initialise logging: {err}");
            None
        }
    };

    let result = match cli.command {
        Command::Detect { image, tuning } => detect_cmd(&image, &tuning.config()),
        Command::Stages {
            image,
            out_dir,
            tuning,
        } => stages_cmd(&image, &out_dir, &tuning.config()),
        Command::Annotate {
            image,
            out,
            line_width,
            tuning,
        } => annotate_cmd(&image, &out, line_width, &tuning.config()),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load(image: &Path) -> Result<ColorRaster> {
    let raster = load_raster(image)
        .with_context(|| format!("failed to load image {}", image.display()))?;
    log::info!(
        "Image: {} ({}x{})",
        image.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

fn detect_cmd(image: &Path, config: &DetectorConfig) -> Result<ExitCode> {
    let raster = load(image)?;
    let start = Instant::now();
    let result = Detector::with_config(*config).detect_region(&raster);
    log::debug!("detection took {:?}", start.elapsed());

    match result {
        Ok(region) => {
            let b = region.bbox;
            println!(
                "{} {} {} {}  (component of {} px, box {}x{})",
                b.min_x,
                b.min_y,
                b.max_x,
                b.max_y,
                region.size,
                b.width(),
                b.height()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(DetectError::NoRegionFound) => {
            println!("no region found");
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Err(err) => Err(err.into()),
    }
}

fn stages_cmd(image: &Path, out_dir: &Path, config: &DetectorConfig) -> Result<ExitCode> {
    let raster = load(image)?;
    let run = Detector::with_config(*config).inspect(&raster);
    let tel = &run.telemetry;

    let smoothed = grid_stats(&run.stages.smoothed);
    log::info!(
        "Smoothed gradient: mean={:.1}, cut-off={}",
        smoothed.mean,
        tel.cutoff
    );
    let thresholded = grid_stats(&run.stages.thresholded);
    log::info!(
        "Thresholded: {} px ({:.2}%), morphed: {} px, components: {}",
        thresholded.nonzero,
        thresholded.nonzero_ratio() * 100.0,
        tel.morphed_pixels,
        tel.components
    );
    for (stage, elapsed) in &tel.timings {
        log::debug!("  {stage:<10} {elapsed:?}");
    }

    let written = save_stages(&run.stages, out_dir)
        .with_context(|| format!("failed to write stages to {}", out_dir.display()))?;
    for path in &written {
        println!("{}", path.display());
    }

    match run.region {
        Some(region) => {
            log::info!(
                "Selected component {} ({} px) at {}",
                region.label,
                region.size,
                region.bbox
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            log::warn!("No region found");
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
    }
}

fn annotate_cmd(
    image: &Path,
    out: &Path,
    line_width: u32,
    config: &DetectorConfig,
) -> Result<ExitCode> {
    let raster = load(image)?;
    let bbox = match Detector::with_config(*config).detect(&raster) {
        Ok(bbox) => bbox,
        Err(DetectError::NoRegionFound) => {
            println!("no region found");
            return Ok(ExitCode::from(EXIT_NOT_FOUND));
        }
        Err(err) => return Err(err.into()),
    };

    save_annotated(&raster, &bbox, [0, 200, 0], line_width, out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("{bbox}");
    log::info!("Wrote {}", out.display());
    Ok(ExitCode::SUCCESS)
}
