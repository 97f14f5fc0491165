//! Receipt parser running every field extractor over one OCR text block.

use std::fmt;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::config::ParserConfig;
use crate::models::receipt::{LineItem, ReceiptRecord, UNKNOWN_MERCHANT};

use super::clock::{Clock, SystemClock};
use super::rules::{
    extract_address, extract_date, extract_line_items, extract_merchant_name, extract_tax,
    extract_total, format_fallback_date, split_lines, GUESSED_MERCHANT_CONFIDENCE,
    INFERRED_TOTAL_CONFIDENCE,
};

/// A receipt field that can fall back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptField {
    MerchantName,
    Address,
    Date,
    TotalAmount,
    TaxAmount,
    LineItems,
}

impl ReceiptField {
    /// Confidence lost when this field falls back to its default.
    fn penalty(self) -> f32 {
        match self {
            ReceiptField::MerchantName => 0.2,
            ReceiptField::Address => 0.05,
            ReceiptField::Date => 0.2,
            ReceiptField::TotalAmount => 0.3,
            ReceiptField::TaxAmount => 0.05,
            ReceiptField::LineItems => 0.2,
        }
    }
}

impl fmt::Display for ReceiptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReceiptField::MerchantName => "merchant name",
            ReceiptField::Address => "address",
            ReceiptField::Date => "date",
            ReceiptField::TotalAmount => "total amount",
            ReceiptField::TaxAmount => "tax amount",
            ReceiptField::LineItems => "line items",
        };
        f.write_str(name)
    }
}

/// Result of receipt extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted receipt data.
    pub record: ReceiptRecord,
    /// Fields that were not found and hold their default value.
    pub missing_fields: Vec<ReceiptField>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    pub fn is_missing(&self, field: ReceiptField) -> bool {
        self.missing_fields.contains(&field)
    }
}

/// Trait for turning receipt text into structured data.
pub trait ReceiptExtractor {
    /// Extract a receipt with a report of which fields fell back to defaults.
    fn extract(&self, text: &str) -> ExtractionResult;

    /// Extract only the receipt record.
    fn extract_record(&self, text: &str) -> ReceiptRecord {
        self.extract(text).record
    }
}

/// Rule-based receipt parser.
///
/// Parsing never fails: every field that cannot be found takes a documented
/// default (see [`ReceiptField`]). The clock is only read when the receipt
/// prints no date.
#[derive(Debug, Clone)]
pub struct ReceiptParser<C = SystemClock> {
    config: ParserConfig,
    clock: C,
}

impl ReceiptParser<SystemClock> {
    /// Create a new parser with default settings reading the system clock.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            clock: SystemClock,
        }
    }
}

impl Default for ReceiptParser<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ReceiptParser<C> {
    /// Replace the time source used for the date fallback.
    pub fn with_clock<D: Clock>(self, clock: D) -> ReceiptParser<D> {
        ReceiptParser {
            config: self.config,
            clock,
        }
    }

    /// Set parser configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse receipt text into a record.
    pub fn parse(&self, text: &str) -> ReceiptRecord {
        self.parse_with_report(text).record
    }

    /// Parse receipt text, reporting which fields fell back to defaults.
    pub fn parse_with_report(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut missing_fields = Vec::new();
        let mut warnings = Vec::new();

        info!("Parsing receipt from {} characters of text", text.len());

        let lines = split_lines(text);
        debug!("Normalized receipt into {} lines", lines.len());

        let config = &self.config;

        let merchant_name = match extract_merchant_name(&lines, config) {
            Some(m) => {
                debug!("Merchant '{}' from line {:?}", m.value, m.line);
                if m.confidence <= GUESSED_MERCHANT_CONFIDENCE {
                    warnings.push("Merchant name guessed from the first line".to_string());
                }
                m.value
            }
            None => {
                missing_fields.push(ReceiptField::MerchantName);
                UNKNOWN_MERCHANT.to_string()
            }
        };

        let address = match extract_address(&lines, config) {
            Some(m) => {
                debug!("Address '{}' from line {:?}", m.value, m.line);
                m.value
            }
            None => {
                missing_fields.push(ReceiptField::Address);
                String::new()
            }
        };

        let date = match extract_date(&lines) {
            Some(m) => {
                debug!("Date '{}' from line {:?}", m.value, m.line);
                m.value
            }
            None => {
                missing_fields.push(ReceiptField::Date);
                let today = format_fallback_date(self.clock.today(), &config.date_fallback_format);
                warnings.push(format!("No date found, using {}", today));
                today
            }
        };

        let total_amount = match extract_total(&lines, config) {
            Some(m) if m.confidence <= INFERRED_TOTAL_CONFIDENCE => {
                debug!("Largest amount {} taken as total from '{}'", m.value, m.source);
                warnings.push("Total inferred from the largest amount".to_string());
                m.value
            }
            Some(m) => {
                debug!("Labeled total {} from '{}'", m.value, m.source);
                m.value
            }
            None => {
                missing_fields.push(ReceiptField::TotalAmount);
                Decimal::ZERO
            }
        };

        let items = match extract_line_items(&lines) {
            Some(items) => {
                debug!("Extracted {} line items", items.len());
                items
            }
            None => {
                missing_fields.push(ReceiptField::LineItems);
                vec![LineItem::placeholder()]
            }
        };

        let tax_amount = match extract_tax(&lines, config) {
            Some(m) => {
                debug!("Tax {} from '{}'", m.value, m.source);
                m.value
            }
            None => {
                missing_fields.push(ReceiptField::TaxAmount);
                Decimal::ZERO
            }
        };

        let record = ReceiptRecord {
            merchant_name,
            address,
            date,
            total_amount,
            currency: config.default_currency.clone(),
            tax_amount,
            items,
        };

        let penalty: f32 = missing_fields.iter().map(|f| f.penalty()).sum();
        let confidence = (1.0 - penalty).max(0.0);

        debug!(
            "Extracted receipt from '{}' with confidence {:.2}",
            record.merchant_name, confidence
        );

        ExtractionResult {
            record,
            missing_fields,
            warnings,
            confidence,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl<C: Clock> ReceiptExtractor for ReceiptParser<C> {
    fn extract(&self, text: &str) -> ExtractionResult {
        self.parse_with_report(text)
    }
}
