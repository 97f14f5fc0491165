//! Receipt data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Description used for the synthesized item when no line item was found.
pub const PLACEHOLDER_DESCRIPTION: &str = "Receipt items";

/// Merchant name used when the receipt has no lines at all.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Currency assigned to every receipt unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// chrono format for fallback dates and pinned reference dates (`DD/MM/YYYY`).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Structured data recovered from the OCR text of a single receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Business name, usually from the receipt header.
    pub merchant_name: String,

    /// Street or postal-code line; empty when none was found.
    pub address: String,

    /// Transaction date exactly as printed (not normalized).
    pub date: String,

    /// Total amount paid. Never negative.
    pub total_amount: Decimal,

    /// Currency code. Not detected from the text.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax amount. Never negative; zero when not printed.
    #[serde(default)]
    pub tax_amount: Decimal,

    /// Line items in order of appearance. Never empty.
    pub items: Vec<LineItem>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A single purchased good or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Quantity.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Line total.
    pub amount: Decimal,
}

impl LineItem {
    /// Create a line item, computing the amount from quantity and unit price.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            amount: quantity.checked_mul(unit_price).unwrap_or(Decimal::MAX),
        }
    }

    /// Override the computed amount with the one printed on the receipt.
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// The item synthesized when a receipt has no recognizable item lines.
    pub fn placeholder() -> Self {
        Self {
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl ReceiptRecord {
    /// Sum of all line item amounts.
    pub fn items_total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, i| acc.checked_add(i.amount).unwrap_or(Decimal::MAX))
    }

    /// Whether the items list holds only the synthesized placeholder.
    pub fn has_only_placeholder(&self) -> bool {
        matches!(self.items.as_slice(), [item] if item.is_placeholder())
    }

    /// Validate the receipt data and return any issues a reviewer should check.
    ///
    /// Never fails; an empty list means nothing looked suspicious.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.merchant_name == UNKNOWN_MERCHANT {
            issues.push("Unknown merchant".to_string());
        }

        if self.total_amount.is_zero() {
            issues.push("Total amount is zero".to_string());
        }

        if self.tax_amount > self.total_amount {
            issues.push(format!(
                "Tax ({}) exceeds total ({})",
                self.tax_amount, self.total_amount
            ));
        }

        if self.has_only_placeholder() {
            issues.push("No line items recognized".to_string());
        } else {
            let calculated = self.items_total();
            if (calculated - self.total_amount).abs() > Decimal::new(1, 2) {
                issues.push(format!(
                    "Line item total ({}) differs from receipt total ({})",
                    calculated, self.total_amount
                ));
            }
        }

        issues
    }
}
