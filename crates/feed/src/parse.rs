//! Row filtering for the input boundary
//!
//! Both supported sources (manual one-value-per-line entry and spreadsheet
//! CSV exports) reduce to the same filtering step: trim, strip one layer of
//! surrounding double quotes, parse as a decimal, keep only positive values.

use crashsim_core::Multiplier;
use rust_decimal::Decimal;

/// Strip one layer of surrounding double quotes, as produced by CSV exports
fn unquote(row: &str) -> &str {
    row.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(row)
}

/// Filter text rows down to valid multipliers
///
/// Non-numeric and non-positive rows are discarded silently; order of the
/// surviving rows is preserved. `Decimal` parsing rejects NaN/Infinity and
/// trailing garbage outright, so nothing non-finite can pass this boundary.
pub fn filter_rows<I, S>(rows: I) -> Vec<Multiplier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .filter_map(|row| unquote(row.as_ref().trim()).parse::<Decimal>().ok())
        .filter(|m| *m > Decimal::ZERO)
        .collect()
}

/// Parse manually entered text, one multiplier per line
pub fn parse_manual(text: &str) -> Vec<Multiplier> {
    filter_rows(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_manual_keeps_valid_lines_in_order() {
        let text = "1.5\n2.1\n1.0\n5.5";
        assert_eq!(
            parse_manual(text),
            vec![dec!(1.5), dec!(2.1), dec!(1.0), dec!(5.5)]
        );
    }

    #[test]
    fn test_discards_non_numeric_rows() {
        let text = "1.5\nmultiplier\n\n2.0x\n3.25";
        assert_eq!(parse_manual(text), vec![dec!(1.5), dec!(3.25)]);
    }

    #[test]
    fn test_discards_non_positive_rows() {
        let text = "0\n-1.5\n0.0\n1.01";
        assert_eq!(parse_manual(text), vec![dec!(1.01)]);
    }

    #[test]
    fn test_strips_csv_quoting_and_whitespace() {
        let rows = ["\"1.97\"", "  2.5  ", "\"\"", "\"abc\""];
        assert_eq!(filter_rows(rows), vec![dec!(1.97), dec!(2.5)]);
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(parse_manual("").is_empty());
        assert!(parse_manual("not a number\n\n").is_empty());
    }
}
