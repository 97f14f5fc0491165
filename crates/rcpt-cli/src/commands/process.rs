//! Process command - extract data from a single receipt text file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::output::{format_receipt, OutputFormat};
use super::{build_extractor, decode_text, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file with OCR output ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Date to use when the receipt prints none (DD/MM/YYYY, default: today)
    #[arg(long)]
    reference_date: Option<String>,

    /// Show extraction confidence and defaulted fields
    #[arg(long)]
    show_confidence: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_input(&args.input).await?;
    info!("Processing {} ({} bytes)", args.input.display(), text.len());

    let extractor = build_extractor(&config, args.reference_date.as_deref())?;
    let result = extractor.extract(&text);

    if args.validate {
        let issues = result.record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_receipt(&result, args.format, &config.export)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            result.confidence * 100.0
        );
        if !result.missing_fields.is_empty() {
            let fields: Vec<String> = result.missing_fields.iter().map(|f| f.to_string()).collect();
            println!("{} Defaulted fields: {}", style("ℹ").blue(), fields.join(", "));
        }
        for warning in &result.warnings {
            println!("{} {}", style("!").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut bytes = Vec::new();
        tokio::io::stdin().read_to_end(&mut bytes).await?;
        return Ok(decode_text(bytes, "stdin"));
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let bytes = tokio::fs::read(input).await?;
    Ok(decode_text(bytes, &input.display().to_string()))
}
