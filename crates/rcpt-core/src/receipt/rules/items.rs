//! Line item extraction for receipts.

use rust_decimal::Decimal;

use super::amounts::{amount_or_zero, parse_amount};
use super::patterns::LINE_ITEM;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::receipt::LineItem;

/// Line item extractor.
///
/// Recognizes `<description> [quantity] x <unit price> [amount]` lines. The
/// separator must be the letter `x`; lines using `×` are not items.
pub struct LineItemExtractor;

impl LineItemExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single line as an item.
    pub fn parse_line(&self, line: &str) -> Option<LineItem> {
        let caps = LINE_ITEM.captures(line)?;

        let description = caps[1].trim();
        let quantity = caps
            .get(2)
            .and_then(|m| parse_amount(m.as_str()))
            .unwrap_or(Decimal::ONE);
        let unit_price = amount_or_zero(&caps[3]);

        let item = LineItem::new(description, quantity, unit_price);

        Some(match caps.get(4).and_then(|m| parse_amount(m.as_str())) {
            Some(amount) => item.with_amount(amount),
            None => item,
        })
    }

    /// All item lines in document order, one item per matching line.
    pub fn extract_all(&self, lines: &[&str]) -> Vec<ExtractionMatch<LineItem>> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                self.parse_line(line)
                    .map(|item| ExtractionMatch::new(item, 0.8, *line).at_line(index))
            })
            .collect()
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = Vec<LineItem>;

    /// `None` when no line looks like an item.
    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        let items: Vec<LineItem> = self
            .extract_all(lines)
            .into_iter()
            .map(|m| m.value)
            .collect();

        if items.is_empty() { None } else { Some(items) }
    }
}

/// Extract line items in document order; `None` when no line is an item.
pub fn extract_line_items(lines: &[&str]) -> Option<Vec<LineItem>> {
    LineItemExtractor::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_explicit_amount() {
        let item = LineItemExtractor::new().parse_line("Bread 2x1,50 3,00€").unwrap();
        assert_eq!(
            item,
            LineItem {
                description: "Bread".to_string(),
                quantity: dec("2"),
                unit_price: dec("1.50"),
                amount: dec("3.00"),
            }
        );
    }

    #[test]
    fn test_computed_amount() {
        let item = LineItemExtractor::new().parse_line("Cerveza 3 x 2.20").unwrap();
        assert_eq!(item.description, "Cerveza");
        assert_eq!(item.amount, dec("6.60"));
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let item = LineItemExtractor::new().parse_line("Menu del dia x 12,90 €").unwrap();
        assert_eq!(item.description, "Menu del dia");
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.amount, dec("12.90"));
    }

    #[test]
    fn test_fractional_quantity() {
        let item = LineItemExtractor::new().parse_line("Queso 0,5 X 18,00 9,00").unwrap();
        assert_eq!(item.quantity, dec("0.5"));
        assert_eq!(item.amount, dec("9.00"));
    }

    #[test]
    fn test_order_preserved_no_merging() {
        let lines = ["Cafe 1x1,20", "TOTAL 3,60", "Cafe 2x1,20 2,40"];
        let items = extract_line_items(&lines).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, dec("1"));
        assert_eq!(items[1].quantity, dec("2"));
        assert_eq!(items[1].amount, dec("2.40"));
    }

    #[test]
    fn test_line_indices() {
        let lines = ["HEADER", "Tea 1x2,00", "Cake 1x3,50"];
        let matches = LineItemExtractor::new().extract_all(&lines);
        let indices: Vec<_> = matches.iter().map(|m| m.line).collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_nothing_matches() {
        assert_eq!(extract_line_items(&["SHOP", "Pan 1,50", "Leche 2×0,90"]), None);
        assert_eq!(extract_line_items(&[]), None);
    }
}
