//! Batch command - scan many card images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use bizcard_core::models::config::BizcardConfig;
use bizcard_core::{CardExtractor, CardParser, CardStore, ExtractionResult, SqliteCardStore, TextReader};

use super::scan::{check_models, is_image, load_engine};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching card images
    #[arg(required = true)]
    input: String,

    /// Number of parallel OCR workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Store the cards that succeeded even if others failed
    #[arg(long)]
    continue_on_error: bool,

    /// Write all extracted cards to a CSV file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Extract only, do not store the cards
    #[arg(long)]
    no_save: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of scanning a single file.
struct FileResult {
    index: usize,
    path: PathBuf,
    outcome: Result<(Vec<u8>, ExtractionResult), String>,
}

pub async fn run(args: BatchArgs, config: &BizcardConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching images found for pattern: {}", args.input);
    }

    println!("{} Found {} images to scan", style("ℹ").blue(), files.len());

    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(|| config.models.model_dir.clone());
    check_models(&model_dir, config)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Each worker owns one engine and a contiguous share of the files.
    let jobs = args.jobs.clamp(1, files.len());
    let chunk_size = files.len().div_ceil(jobs);
    let mut workers = JoinSet::new();

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let chunk: Vec<PathBuf> = chunk.to_vec();
        let offset = chunk_index * chunk_size;
        let model_dir = model_dir.clone();
        let settings = config.clone();
        let pb = pb.clone();

        workers.spawn_blocking(move || -> anyhow::Result<Vec<FileResult>> {
            let engine = load_engine(&model_dir, &settings)?;
            let parser = CardParser::from_config(&settings.extraction);

            let results = chunk
                .into_iter()
                .enumerate()
                .map(|(i, path)| {
                    let outcome = fs::read(&path)
                        .map_err(|e| e.to_string())
                        .and_then(|image| {
                            let ocr = engine.read(&image).map_err(|e| e.to_string())?;
                            Ok((image, parser.extract(&ocr)))
                        });
                    pb.inc(1);
                    FileResult {
                        index: offset + i,
                        path,
                        outcome,
                    }
                })
                .collect();

            Ok(results)
        });
    }

    let mut results = Vec::with_capacity(files.len());
    while let Some(joined) = workers.join_next().await {
        results.extend(joined??);
    }
    results.sort_by_key(|r| r.index);

    pb.finish_and_clear();

    let failures: Vec<&FileResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    for failure in &failures {
        if let Err(e) = &failure.outcome {
            warn!("Failed to scan {}: {}", failure.path.display(), e);
            eprintln!("{} {}: {}", style("✗").red(), failure.path.display(), e);
        }
    }

    if !failures.is_empty() && !args.continue_on_error {
        anyhow::bail!(
            "{} of {} images failed, nothing stored (use --continue-on-error to keep the rest)",
            failures.len(),
            results.len()
        );
    }

    let scanned: Vec<(&PathBuf, &Vec<u8>, &ExtractionResult)> = results
        .iter()
        .filter_map(|r| match &r.outcome {
            Ok((image, result)) => Some((&r.path, image, result)),
            Err(_) => None,
        })
        .collect();

    let mut stored = 0;
    if !args.no_save {
        let store = SqliteCardStore::open(config.database_path())?;
        for (path, image, result) in &scanned {
            let id = store.insert(&result.record, image)?;
            debug!("Stored {} as card {}", path.display(), id);
            stored += 1;
        }
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &scanned)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Scanned {} images ({} failed), stored {} cards in {:.1}s",
        style("✓").green(),
        results.len(),
        failures.len(),
        stored,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn write_summary(
    path: &Path,
    scanned: &[(&PathBuf, &Vec<u8>, &ExtractionResult)],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["file"];
    header.extend(bizcard_core::CardField::ALL.iter().map(|f| f.key()));
    wtr.write_record(&header)?;

    for (file, _, result) in scanned {
        let mut row = vec![file.display().to_string()];
        row.extend(result.record.fields().iter().map(|(_, v)| v.to_string()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
