//! Address extraction.

use super::patterns::{POSTAL_CODE, STREET_KEYWORD};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ParserConfig;

/// Address extractor.
///
/// A line is taken as the address when it names a street type or carries a
/// five-digit postal code. The address is optional, so there is no fallback.
pub struct AddressExtractor {
    scan_lines: usize,
}

impl AddressExtractor {
    pub fn new() -> Self {
        Self { scan_lines: 10 }
    }

    /// Set how many leading lines are searched.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines;
        self
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        for (index, line) in lines.iter().take(self.scan_lines).enumerate() {
            let confidence = if STREET_KEYWORD.is_match(line) {
                0.9
            } else if POSTAL_CODE.is_match(line) {
                0.6
            } else {
                continue;
            };

            return Some(ExtractionMatch::new(line.to_string(), confidence, *line).at_line(index));
        }

        None
    }
}

/// Extract the address line with the configured header window.
pub fn extract_address(
    lines: &[&str],
    config: &ParserConfig,
) -> Option<ExtractionMatch<String>> {
    AddressExtractor::new()
        .with_scan_lines(config.address_scan_lines)
        .extract(lines)
}
