//! Output formatting shared by `process` and `batch`.

use rcpt_core::models::config::ExportConfig;
use rcpt_core::receipt::ExtractionResult;
use rcpt_core::report::expense_rows;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV summary with one row per receipt
    Csv,
    /// Plain text summary
    Text,
    /// CSV expense report rows, one per line item
    Expense,
}

impl OutputFormat {
    /// File extension used when writing to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv | OutputFormat::Expense => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_receipt(
    result: &ExtractionResult,
    format: OutputFormat,
    export: &ExportConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Expense => format_expense(result, export),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let record = &result.record;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "merchant_name",
        "address",
        "date",
        "total_amount",
        "tax_amount",
        "currency",
        "item_count",
    ])?;

    wtr.write_record([
        &record.merchant_name,
        &record.address,
        &record.date,
        &record.total_amount.to_string(),
        &record.tax_amount.to_string(),
        &record.currency,
        &record.items.len().to_string(),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_expense(result: &ExtractionResult, export: &ExportConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for row in expense_rows(&result.record, export) {
        wtr.serialize(row)?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &ExtractionResult) -> String {
    let record = &result.record;
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", record.merchant_name));
    if !record.address.is_empty() {
        output.push_str(&format!("Address:  {}\n", record.address));
    }
    output.push_str(&format!("Date:     {}\n", record.date));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        output.push_str(&format!(
            "  {:<30} {:>6} x {:>8} = {:>9}\n",
            item.description, item.quantity, item.unit_price, item.amount
        ));
    }
    output.push('\n');

    output.push_str(&format!("Tax:   {} {}\n", record.tax_amount, record.currency));
    output.push_str(&format!("Total: {} {}\n", record.total_amount, record.currency));

    output
}
