//! Core library for receipt OCR text extraction.
//!
//! This crate provides:
//! - Receipt field extraction from raw OCR text (merchant, address, date,
//!   total, tax, line items)
//! - Receipt data models and configuration
//! - Expense report rows for downstream template fillers

pub mod error;
pub mod models;
pub mod receipt;
pub mod report;

pub use error::{RcptError, Result};
pub use models::config::{ExportConfig, ParserConfig, RcptConfig};
pub use models::receipt::{LineItem, ReceiptRecord};
pub use receipt::{
    parse_receipt, Clock, ExtractionResult, FixedClock, ReceiptExtractor, ReceiptField,
    ReceiptParser, SystemClock,
};
pub use report::{expense_rows, ExpenseRow};
