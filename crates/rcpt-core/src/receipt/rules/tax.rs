//! Tax (IVA/VAT) extraction for receipts.

use rust_decimal::Decimal;

use super::amounts::amount_or_zero;
use super::patterns::LABELED_TAX;
use super::{bottom_lines, ExtractionMatch, FieldExtractor};
use crate::models::config::ParserConfig;

/// Tax amount extractor.
pub struct TaxExtractor {
    scan_lines: usize,
}

impl TaxExtractor {
    pub fn new() -> Self {
        Self { scan_lines: 10 }
    }

    /// Set how many trailing lines are searched.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines;
        self
    }
}

impl Default for TaxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaxExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        bottom_lines(lines, self.scan_lines).find_map(|(index, line)| {
            LABELED_TAX.captures(line).map(|caps| {
                ExtractionMatch::new(amount_or_zero(&caps[1]), 0.9, line).at_line(index)
            })
        })
    }
}

/// Extract the tax amount from the configured trailing window.
pub fn extract_tax(
    lines: &[&str],
    config: &ParserConfig,
) -> Option<ExtractionMatch<Decimal>> {
    TaxExtractor::new()
        .with_scan_lines(config.tax_scan_lines)
        .extract(lines)
}
