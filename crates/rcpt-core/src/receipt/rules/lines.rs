//! Line normalization.

/// Split OCR text into trimmed, non-empty lines, preserving source order.
///
/// No case or accent folding happens here; matchers are case-insensitive
/// where they need to be.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let text = "  SUPERMARKET XYZ  \n\n\t\nCalle Mayor 5\r\nTOTAL: 3,00€\n";
        assert_eq!(
            split_lines(text),
            vec!["SUPERMARKET XYZ", "Calle Mayor 5", "TOTAL: 3,00€"]
        );
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
        assert!(split_lines(" \n \n").is_empty());
    }

    #[test]
    fn test_split_lines_keeps_case() {
        assert_eq!(split_lines("Café Zürich"), vec!["Café Zürich"]);
    }
}
