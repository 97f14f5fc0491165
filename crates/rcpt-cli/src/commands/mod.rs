//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use rcpt_core::models::config::RcptConfig;
use rcpt_core::models::receipt::DEFAULT_DATE_FORMAT;
use rcpt_core::receipt::{FixedClock, ReceiptExtractor, ReceiptParser};

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

/// Build a shareable receipt extractor, pinning the date fallback if asked.
pub fn build_extractor(
    config: &RcptConfig,
    reference_date: Option<&str>,
) -> anyhow::Result<Arc<dyn ReceiptExtractor + Send + Sync>> {
    let parser = ReceiptParser::new().with_config(config.parser.clone());

    let extractor: Arc<dyn ReceiptExtractor + Send + Sync> = match reference_date {
        Some(date) => {
            let clock = FixedClock::parse(date, DEFAULT_DATE_FORMAT)?;
            Arc::new(parser.with_clock(clock))
        }
        None => Arc::new(parser),
    };

    Ok(extractor)
}

/// Decode OCR output, replacing invalid UTF-8 so extraction still runs.
pub fn decode_text(bytes: Vec<u8>, source: &str) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        warn!("{} is not valid UTF-8, replacing invalid bytes", source);
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    })
}
