//! Amount parsing and total extraction for receipts.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_WITH_CURRENCY, LABELED_TOTAL};
use super::{bottom_lines, ExtractionMatch, FieldExtractor};
use crate::models::config::ParserConfig;

/// Confidence of a labeled total.
pub const LABELED_TOTAL_CONFIDENCE: f32 = 0.95;

/// Confidence of a total inferred from the largest euro amount.
pub const INFERRED_TOTAL_CONFIDENCE: f32 = 0.6;

/// Parse a receipt amount token ("12,50" or "12.50").
///
/// The comma is rewritten to a dot before parsing; tokens that still do not
/// parse (or overflow) yield `None`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.trim().replace(',', ".")).ok()
}

/// Parse an amount token, resolving anything unparsable to zero.
pub fn amount_or_zero(s: &str) -> Decimal {
    parse_amount(s).unwrap_or(Decimal::ZERO)
}

/// Total amount extractor.
///
/// Tier one looks for a "total"/"suma"/"amount" label near the bottom of the
/// receipt. Tier two takes the largest euro amount anywhere on the receipt.
pub struct TotalExtractor {
    scan_lines: usize,
}

impl TotalExtractor {
    pub fn new() -> Self {
        Self { scan_lines: 15 }
    }

    /// Set how many trailing lines are searched for a labeled total.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines;
        self
    }

    /// Labeled total closest to the bottom of the receipt.
    pub fn extract_labeled(&self, lines: &[&str]) -> Option<ExtractionMatch<Decimal>> {
        bottom_lines(lines, self.scan_lines).find_map(|(index, line)| {
            LABELED_TOTAL.captures(line).map(|caps| {
                ExtractionMatch::new(amount_or_zero(&caps[1]), LABELED_TOTAL_CONFIDENCE, line)
                    .at_line(index)
            })
        })
    }

    /// Largest amount followed by a euro sign anywhere on the receipt.
    ///
    /// Ties keep the earliest occurrence.
    pub fn extract_largest(&self, lines: &[&str]) -> Option<ExtractionMatch<Decimal>> {
        let mut largest: Option<ExtractionMatch<Decimal>> = None;

        for (index, line) in lines.iter().enumerate() {
            for caps in AMOUNT_WITH_CURRENCY.captures_iter(line) {
                let amount = amount_or_zero(&caps[1]);
                if largest.as_ref().is_none_or(|m| amount > m.value) {
                    largest = Some(
                        ExtractionMatch::new(amount, INFERRED_TOTAL_CONFIDENCE, *line)
                            .at_line(index),
                    );
                }
            }
        }

        largest
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        self.extract_labeled(lines)
            .or_else(|| self.extract_largest(lines))
    }
}

/// Extract the total: a labeled amount in the configured trailing window,
/// else the largest euro amount on the receipt.
///
/// An inferred total carries [`INFERRED_TOTAL_CONFIDENCE`].
pub fn extract_total(
    lines: &[&str],
    config: &ParserConfig,
) -> Option<ExtractionMatch<Decimal>> {
    TotalExtractor::new()
        .with_scan_lines(config.total_scan_lines)
        .extract(lines)
}
