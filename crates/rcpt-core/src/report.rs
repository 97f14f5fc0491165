//! Expense report rows derived from a parsed receipt.
//!
//! One row per line item, carrying the receipt-level date, merchant and
//! address alongside the item. Where the rows land in a spreadsheet is up to
//! the consumer.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::config::ExportConfig;
use crate::models::receipt::ReceiptRecord;

/// A single expense report line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    pub date: String,
    pub merchant: String,
    pub address: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub exchange_rate: f64,
    pub account_code: String,
}

/// Build expense rows for every line item, up to `config.max_rows`.
pub fn expense_rows(record: &ReceiptRecord, config: &ExportConfig) -> Vec<ExpenseRow> {
    let limit = match config.max_rows {
        0 => usize::MAX,
        n => n,
    };

    if record.items.len() > limit {
        warn!(
            "Receipt has {} items, only the first {} fit in the expense report",
            record.items.len(),
            limit
        );
    }

    record
        .items
        .iter()
        .take(limit)
        .map(|item| ExpenseRow {
            date: record.date.clone(),
            merchant: record.merchant_name.clone(),
            address: record.address.clone(),
            description: item.description.clone(),
            amount: item.amount,
            currency: record.currency.clone(),
            exchange_rate: config.exchange_rate,
            account_code: config.account_code.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::LineItem;
    use std::str::FromStr;

    fn record(count: usize) -> ReceiptRecord {
        ReceiptRecord {
            merchant_name: "BAR CENTRAL".to_string(),
            address: "Calle Mayor 5".to_string(),
            date: "01/03/2024".to_string(),
            total_amount: Decimal::ZERO,
            currency: "EUR".to_string(),
            tax_amount: Decimal::ZERO,
            items: (0..count)
                .map(|i| LineItem::new(format!("Item {}", i), Decimal::ONE, Decimal::from(i)))
                .collect(),
        }
    }

    #[test]
    fn test_one_row_per_item() {
        let rows = expense_rows(&record(2), &ExportConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].description, "Item 1");
        assert_eq!(rows[1].amount, Decimal::from_str("1").unwrap());
        assert_eq!(rows[0].merchant, "BAR CENTRAL");
        assert_eq!(rows[0].account_code, "8464 - Meals & Entertainment");
        assert_eq!(rows[0].exchange_rate, 1.0);
    }

    #[test]
    fn test_rows_capped() {
        let config = ExportConfig {
            max_rows: 3,
            ..ExportConfig::default()
        };
        let rows = expense_rows(&record(5), &config);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].description, "Item 2");
    }

    #[test]
    fn test_zero_means_unlimited() {
        let config = ExportConfig {
            max_rows: 0,
            ..ExportConfig::default()
        };
        assert_eq!(expense_rows(&record(100), &config).len(), 100);
    }
}
