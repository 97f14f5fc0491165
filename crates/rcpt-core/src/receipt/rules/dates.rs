//! Date extraction for receipts.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use super::patterns::{DATE_ENGLISH_MONTH, DATE_NUMERIC, DATE_SPANISH_MONTH};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::receipt::DEFAULT_DATE_FORMAT;

/// Date field extractor.
///
/// Lines are scanned top to bottom and every pattern family is tried on a
/// line before moving to the next one, so an earlier line with a month-name
/// date beats a later numeric date. The matched text is returned verbatim.
pub struct DateExtractor {
    patterns: [(&'static Regex, f32); 3],
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            patterns: [
                (&*DATE_NUMERIC, 0.9),
                (&*DATE_SPANISH_MONTH, 0.85),
                (&*DATE_ENGLISH_MONTH, 0.85),
            ],
        }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        for (index, line) in lines.iter().enumerate() {
            for (pattern, confidence) in &self.patterns {
                if let Some(m) = pattern.find(line) {
                    return Some(
                        ExtractionMatch::new(m.as_str().to_string(), *confidence, *line)
                            .at_line(index),
                    );
                }
            }
        }

        None
    }
}

/// Format `date` with a chrono format string.
///
/// `None` when the format is malformed or asks for fields a plain date does
/// not have (`%H`, `%M`, `%z`, ...).
pub fn try_format_date(date: NaiveDate, format: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Format `date` for the record, falling back to `DD/MM/YYYY` when `format`
/// cannot render a date.
pub fn format_fallback_date(date: NaiveDate, format: &str) -> String {
    try_format_date(date, format).unwrap_or_else(|| {
        warn!("Invalid date format '{}', using {}", format, DEFAULT_DATE_FORMAT);
        date.format(DEFAULT_DATE_FORMAT).to_string()
    })
}

/// Find the first printed date, top to bottom.
pub fn extract_date(lines: &[&str]) -> Option<ExtractionMatch<String>> {
    DateExtractor::new().extract(lines)
}
