//! Receipt field extraction module.

pub mod clock;
mod parser;
pub mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use parser::{ExtractionResult, ReceiptExtractor, ReceiptField, ReceiptParser};

use crate::models::receipt::ReceiptRecord;

/// Parse receipt text with default settings and the system clock.
pub fn parse_receipt(text: &str) -> ReceiptRecord {
    ReceiptParser::new().parse(text)
}
