//! Rule-based field extractors for receipts.
//!
//! Every extractor works on the normalized line list produced by
//! [`split_lines`] and tries its pattern tiers in order, stopping at the first
//! hit. A `None` from [`FieldExtractor::extract`] is an extraction miss; the
//! parser replaces it with the field's default.

pub mod address;
pub mod amounts;
pub mod dates;
pub mod items;
pub mod lines;
pub mod merchant;
pub mod patterns;
pub mod tax;

pub use address::{extract_address, AddressExtractor};
pub use amounts::{
    extract_total, parse_amount, TotalExtractor, INFERRED_TOTAL_CONFIDENCE,
    LABELED_TOTAL_CONFIDENCE,
};
pub use dates::{extract_date, format_fallback_date, try_format_date, DateExtractor};
pub use items::{extract_line_items, LineItemExtractor};
pub use lines::split_lines;
pub use merchant::{extract_merchant_name, MerchantExtractor, GUESSED_MERCHANT_CONFIDENCE};
pub use patterns::*;
pub use tax::{extract_tax, TaxExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the receipt lines.
    fn extract(&self, lines: &[&str]) -> Option<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Index of the matched line in the normalized line list.
    pub line: Option<usize>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            line: None,
            source: source.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Iterate over the last `count` lines, bottom first, with their original indices.
pub(crate) fn bottom_lines<'a>(
    lines: &'a [&'a str],
    count: usize,
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    lines.iter().copied().enumerate().rev().take(count)
}
