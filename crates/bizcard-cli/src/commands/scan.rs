//! Scan command - extract and store a single business card image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bizcard_core::models::config::BizcardConfig;
use bizcard_core::{
    create_engine_from_dir, CardParser, CardScanner, ExtractionResult, PureOcrEngine,
    SqliteCardStore, TextReader,
};

use super::output::{describe_notice, format_result, write_output, OutputFormat};

/// Image extensions accepted by the scan and batch commands.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Business card image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Print the recognized text in scan order without extracting fields
    #[arg(long)]
    raw: bool,

    /// Extract only, do not store the card
    #[arg(long)]
    no_save: bool,

    /// Show leftover tokens and extraction notices
    #[arg(long)]
    details: bool,
}

/// Outcome of the blocking part of a scan.
enum ScanOutcome {
    Raw(Vec<String>),
    Extracted(ExtractionResult),
    Stored(bizcard_core::ScannedCard),
}

pub async fn run(args: ScanArgs, config: &BizcardConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !is_image(&args.input) {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    info!("Scanning card: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Loading image...");

    let image = fs::read(&args.input)?;
    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(|| config.models.model_dir.clone());
    let settings = config.clone();
    let raw = args.raw;
    let save = !args.no_save;

    pb.set_message("Running OCR...");
    let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<ScanOutcome> {
        let engine = load_engine(&model_dir, &settings)?;

        if raw {
            return Ok(ScanOutcome::Raw(engine.read_tokens(&image)?));
        }

        let store = SqliteCardStore::open(settings.database_path())?;
        let scanner = CardScanner::new(&engine, &store)
            .with_parser(CardParser::from_config(&settings.extraction));

        if save {
            Ok(ScanOutcome::Stored(scanner.scan_and_store(&image)?))
        } else {
            Ok(ScanOutcome::Extracted(scanner.read(&image)?))
        }
    })
    .await??;

    pb.finish_and_clear();

    match outcome {
        ScanOutcome::Raw(tokens) => {
            write_output(args.output.as_deref(), &tokens.join("\n"))?;
        }
        ScanOutcome::Extracted(result) => {
            report(&args, &result)?;
        }
        ScanOutcome::Stored(scanned) => {
            report(&args, &scanned.result)?;
            eprintln!("{} Stored as card {}", style("✓").green(), scanned.id);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn report(args: &ScanArgs, result: &ExtractionResult) -> anyhow::Result<()> {
    let output = format_result(result, args.format, args.details)?;
    write_output(args.output.as_deref(), &output)?;

    for notice in &result.notices {
        eprintln!("{} {}", style("ℹ").blue(), describe_notice(notice));
    }
    Ok(())
}

/// Load the OCR engine, with a hint when models are missing.
pub fn load_engine(model_dir: &Path, config: &BizcardConfig) -> anyhow::Result<PureOcrEngine> {
    check_models(model_dir, config)?;

    debug!("Using models from {}", model_dir.display());
    create_engine_from_dir(model_dir, &config.models, config.ocr.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))
}

/// Check that the configured model files exist in `model_dir`.
pub fn check_models(model_dir: &Path, config: &BizcardConfig) -> anyhow::Result<()> {
    let models = &config.models;
    let missing = [&models.detection_model, &models.recognition_model, &models.dictionary]
        .into_iter()
        .any(|name| !model_dir.join(name).exists());

    if missing {
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Place {}, {} and {} there or pass --model-dir.",
            model_dir.display(),
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        );
    }
    Ok(())
}

pub fn is_image(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}
