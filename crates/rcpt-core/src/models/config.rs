//! Configuration structures for receipt extraction and export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RcptError, Result};
use crate::models::receipt::{DEFAULT_CURRENCY, DEFAULT_DATE_FORMAT};
use crate::receipt::rules::try_format_date;

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Receipt parser configuration.
    pub parser: ParserConfig,

    /// Expense-row export configuration.
    pub export: ExportConfig,
}

/// Receipt parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Number of leading lines searched for the merchant name.
    pub merchant_scan_lines: usize,

    /// A merchant line must be longer than this many characters.
    pub merchant_min_length: usize,

    /// Number of leading lines searched for the address.
    pub address_scan_lines: usize,

    /// Number of trailing lines searched for a labeled total.
    pub total_scan_lines: usize,

    /// Number of trailing lines searched for a tax amount.
    pub tax_scan_lines: usize,

    /// Currency assigned to every parsed receipt.
    pub default_currency: String,

    /// chrono format used when the date falls back to today.
    pub date_fallback_format: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            merchant_scan_lines: 5,
            merchant_min_length: 5,
            address_scan_lines: 10,
            total_scan_lines: 15,
            tax_scan_lines: 10,
            default_currency: DEFAULT_CURRENCY.to_string(),
            date_fallback_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Expense report export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Account code written on every expense row.
    pub account_code: String,

    /// Exchange rate to the reporting currency.
    pub exchange_rate: f64,

    /// Maximum number of expense rows per receipt (0 = unlimited).
    pub max_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            account_code: "8464 - Meals & Entertainment".to_string(),
            exchange_rate: 1.0,
            // The report template has room for 88 expense lines.
            max_rows: 88,
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the parser or exporter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.parser.default_currency.trim().is_empty() {
            return Err(RcptError::Config(
                "parser.default_currency must not be empty".to_string(),
            ));
        }
        if self.parser.merchant_scan_lines == 0 {
            return Err(RcptError::Config(
                "parser.merchant_scan_lines must be at least 1".to_string(),
            ));
        }
        if try_format_date(NaiveDate::default(), &self.parser.date_fallback_format).is_none() {
            return Err(RcptError::Config(format!(
                "parser.date_fallback_format '{}' cannot format a date",
                self.parser.date_fallback_format
            )));
        }
        if !self.export.exchange_rate.is_finite() || self.export.exchange_rate <= 0.0 {
            return Err(RcptError::Config(format!(
                "export.exchange_rate must be a positive number, got {}",
                self.export.exchange_rate
            )));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
