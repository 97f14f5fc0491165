//! Batch processing command for multiple receipt text files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, SecondsFormat};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use rcpt_core::receipt::ExtractionResult;

use super::output::{format_receipt, OutputFormat};
use super::{build_extractor, decode_text, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Date to use when a receipt prints none (DD/MM/YYYY, default: today)
    #[arg(long)]
    reference_date: Option<String>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = build_extractor(&config, args.reference_date.as_deref())?;
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let extractor = Arc::clone(&extractor);
        let permits = Arc::clone(&permits);

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let file_start = Instant::now();

            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let text = decode_text(bytes, &path.display().to_string());
                    let extraction = extractor.extract(&text);
                    ProcessResult {
                        path,
                        extraction: Some(extraction),
                        error: None,
                        processing_time_ms: file_start.elapsed().as_millis() as u64,
                    }
                }
                Err(e) => ProcessResult {
                    path,
                    extraction: None,
                    error: Some(e.to_string()),
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                },
            };

            anyhow::Ok((index, result))
        });
    }

    let mut slots: Vec<Option<ProcessResult>> = files.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined??;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                tasks.abort_all();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        slots[index] = Some(result);
        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    // Report in input order regardless of completion order
    let results: Vec<ProcessResult> = slots.into_iter().flatten().collect();

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(extraction) = &result.extraction {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = format_receipt(extraction, args.format, &config.export)?;
                tokio::fs::write(&output_path, content).await?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// One line of the batch summary CSV.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'static str,
    merchant_name: Option<&'a str>,
    date: Option<&'a str>,
    total_amount: Option<String>,
    tax_amount: Option<String>,
    currency: Option<&'a str>,
    item_count: Option<usize>,
    confidence: Option<String>,
    processing_time_ms: u64,
    error: Option<&'a str>,
    processed_at: &'a str,
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let row = match &result.extraction {
            Some(extraction) => {
                let record = &extraction.record;
                SummaryRow {
                    filename,
                    status: "success",
                    merchant_name: Some(record.merchant_name.as_str()),
                    date: Some(record.date.as_str()),
                    total_amount: Some(record.total_amount.to_string()),
                    tax_amount: Some(record.tax_amount.to_string()),
                    currency: Some(record.currency.as_str()),
                    item_count: Some(record.items.len()),
                    confidence: Some(format!("{:.2}", extraction.confidence)),
                    processing_time_ms: result.processing_time_ms,
                    error: None,
                    processed_at: &processed_at,
                }
            }
            None => SummaryRow {
                filename,
                status: "error",
                merchant_name: None,
                date: None,
                total_amount: None,
                tax_amount: None,
                currency: None,
                item_count: None,
                confidence: None,
                processing_time_ms: result.processing_time_ms,
                error: result.error.as_deref(),
                processed_at: &processed_at,
            },
        };

        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
