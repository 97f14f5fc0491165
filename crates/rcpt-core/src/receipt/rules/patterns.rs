//! Common regex patterns for receipt extraction.
//!
//! Digits are spelled `[0-9]` so OCR noise in other scripts never reaches the
//! decimal parser.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Phone numbers, tax IDs and similar long identifiers
    pub static ref LONG_DIGIT_RUN: Regex = Regex::new(
        r"[0-9]{5,}"
    ).unwrap();

    // Street-type keywords (Spanish and English)
    pub static ref STREET_KEYWORD: Regex = Regex::new(
        r"(?i)(?:calle|street|st\.|avenue|ave\.|road|rd\.)"
    ).unwrap();

    // Five-digit postal code anywhere in the line
    pub static ref POSTAL_CODE: Regex = Regex::new(
        r"[0-9]{5}"
    ).unwrap();

    // Date patterns, in priority order
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"[0-9]{1,2}[/\-.][0-9]{1,2}[/\-.][0-9]{2,4}"
    ).unwrap();

    pub static ref DATE_SPANISH_MONTH: Regex = Regex::new(
        r"(?i)[0-9]{1,2}\s+(?:ene|feb|mar|abr|may|jun|jul|ago|sep|oct|nov|dic)\.?\s+[0-9]{4}"
    ).unwrap();

    pub static ref DATE_ENGLISH_MONTH: Regex = Regex::new(
        r"(?i)[0-9]{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\.?\s+[0-9]{4}"
    ).unwrap();

    // Amounts (1,50 / 1.50) with optional euro sign
    pub static ref LABELED_TOTAL: Regex = Regex::new(
        r"(?i)(?:total|suma|amount).*?([0-9]+[,.][0-9]{2})\s*€?"
    ).unwrap();

    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"([0-9]+[,.][0-9]{2})\s*€"
    ).unwrap();

    pub static ref LABELED_TAX: Regex = Regex::new(
        r"(?i)(?:IVA|VAT|tax).*?([0-9]+[,.][0-9]{2})\s*€?"
    ).unwrap();

    // "<description> [quantity] x <unit price> [amount]"
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"(?i)^(.+?)\s+(?:([0-9]+(?:[,.][0-9]+)?)\s*)?x\s*([0-9]+[,.][0-9]{2})\s*€?\s*([0-9]+[,.][0-9]{2})?\s*€?"
    ).unwrap();
}
