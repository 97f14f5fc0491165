//! Merchant name extraction.

use super::patterns::LONG_DIGIT_RUN;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ParserConfig;

/// Confidence of the first-line guess used when no header line qualifies.
pub const GUESSED_MERCHANT_CONFIDENCE: f32 = 0.4;

/// Merchant name extractor.
///
/// Receipt headers print the business name before phone numbers and tax IDs,
/// so the first reasonably long line without a long digit run wins.
pub struct MerchantExtractor {
    scan_lines: usize,
    min_length: usize,
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self {
            scan_lines: 5,
            min_length: 5,
        }
    }

    /// Set how many leading lines are searched.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines;
        self
    }

    /// Set the length a line must exceed to qualify.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    fn qualifies(&self, line: &str) -> bool {
        line.chars().count() > self.min_length && !LONG_DIGIT_RUN.is_match(line)
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MerchantExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        let header = lines
            .iter()
            .take(self.scan_lines)
            .enumerate()
            .find(|(_, line)| self.qualifies(line));

        if let Some((index, line)) = header {
            return Some(ExtractionMatch::new(line.to_string(), 0.9, *line).at_line(index));
        }

        // Nothing looked like a name; the first line is the best guess
        lines
            .first()
            .map(|line| {
                ExtractionMatch::new(line.to_string(), GUESSED_MERCHANT_CONFIDENCE, *line)
                    .at_line(0)
            })
    }
}

/// Extract the merchant name with the configured header window.
pub fn extract_merchant_name(
    lines: &[&str],
    config: &ParserConfig,
) -> Option<ExtractionMatch<String>> {
    MerchantExtractor::new()
        .with_scan_lines(config.merchant_scan_lines)
        .with_min_length(config.merchant_min_length)
        .extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_qualifying_line() {
        let lines = ["*", "TEL 912345678", "MERCADONA S.A.", "Calle Mayor 5"];
        let result = MerchantExtractor::new().extract(&lines).unwrap();
        assert_eq!(result.value, "MERCADONA S.A.");
        assert_eq!(result.line, Some(2));
    }

    #[test]
    fn test_short_lines_skipped() {
        // "ZARA" and "12345" are both rejected, the latter for length too
        let lines = ["ZARA", "12345", "Gran Via 32"];
        let result = extract_merchant_name(&lines, &ParserConfig::default()).unwrap();
        assert_eq!(result.value, "Gran Via 32");
    }

    #[test]
    fn test_only_first_five_lines_scanned() {
        let lines = ["A", "B", "C", "D", "E", "LONG MERCHANT NAME"];
        let result = MerchantExtractor::new().extract(&lines).unwrap();
        assert_eq!(result.value, "A");
        assert_eq!(result.confidence, GUESSED_MERCHANT_CONFIDENCE);
    }

    #[test]
    fn test_configured_window() {
        let lines = ["A", "B", "LONG MERCHANT NAME"];
        let config = ParserConfig {
            merchant_scan_lines: 2,
            ..ParserConfig::default()
        };
        let result = extract_merchant_name(&lines, &config).unwrap();
        assert_eq!(result.value, "A");

        let config = ParserConfig {
            merchant_min_length: 20,
            ..ParserConfig::default()
        };
        let result = extract_merchant_name(&lines, &config).unwrap();
        assert_eq!(result.confidence, GUESSED_MERCHANT_CONFIDENCE);
    }

    #[test]
    fn test_empty_receipt() {
        assert!(MerchantExtractor::new().extract(&[]).is_none());
        assert!(extract_merchant_name(&[], &ParserConfig::default()).is_none());
    }
}
