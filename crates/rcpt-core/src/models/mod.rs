//! Data models for receipts and configuration.

pub mod config;
pub mod receipt;

pub use config::{ExportConfig, ParserConfig, RcptConfig};
pub use receipt::{LineItem, ReceiptRecord};
