use super::errors::NumericError;
use super::numeric::parse_amount;
use super::{BalanceCleanup, Numeric};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_numeric_parses_noisy_currency_strings() -> Result<()> {
    let test_cases = vec![
        ("1,234.50", "1234.50"),
        ("  500  ", "500"),
        ("12,34,567.89", "1234567.89"),
        ("1,000\n.00", "1000.00"),
        ("-42.10", "-42.10"),
        ("+7", "7"),
        ("1e3", "1000"),
    ];

    for (input_string, expected_output) in test_cases {
        let parsed = Numeric::parse(input_string, BalanceCleanup::PlainNumeric);
        assert_eq!(parsed, Numeric::Value(Decimal::from_str(expected_output)?), "input {input_string:?}");
    }

    Ok(())
}

#[test]
fn test_numeric_resolves_unreadable_values_to_missing() {
    assert_eq!(Numeric::parse("", BalanceCleanup::PlainNumeric), Numeric::Missing);
    assert_eq!(Numeric::parse("   ", BalanceCleanup::PlainNumeric), Numeric::Missing);
    assert_eq!(Numeric::parse("nan", BalanceCleanup::PlainNumeric), Numeric::Missing);
    assert_eq!(Numeric::parse("NaN", BalanceCleanup::SuffixedDrCr), Numeric::Missing);
    assert_eq!(Numeric::parse("abc", BalanceCleanup::PlainNumeric), Numeric::Missing);
    assert_eq!(Numeric::parse("1.2.3", BalanceCleanup::PlainNumeric), Numeric::Missing);
}

#[test]
fn test_parse_amount_reports_the_failure_reason() {
    assert_eq!(parse_amount("", BalanceCleanup::PlainNumeric), Err(NumericError::Empty));
    assert_eq!(parse_amount("nan", BalanceCleanup::PlainNumeric), Err(NumericError::NotANumber));
    assert!(matches!(parse_amount("12abc", BalanceCleanup::PlainNumeric), Err(NumericError::InvalidFormat(_))));
}

#[test]
fn test_suffixed_cleanup_strips_trailing_dr_and_cr_tokens() -> Result<()> {
    let test_cases = vec![
        ("500.00 Dr", "500.00"),
        ("500.00 Dr.", "500.00"),
        ("1,250.75 Cr.", "1250.75"),
        ("1,250.75cr", "1250.75"),
        ("300.00.Cr", "300.00"),
        ("  42\nDR  ", "42"),
        ("99.10", "99.10"),
    ];

    for (input_string, expected_output) in test_cases {
        let parsed = Numeric::parse(input_string, BalanceCleanup::SuffixedDrCr);
        assert_eq!(parsed.value(), Some(Decimal::from_str(expected_output)?), "input {input_string:?}");
    }

    Ok(())
}

#[test]
fn test_plain_cleanup_does_not_strip_suffixes() {
    assert_eq!(Numeric::parse("500.00 Dr", BalanceCleanup::PlainNumeric), Numeric::Missing);
}

#[test]
fn test_cleaning_an_already_clean_value_round_trips() -> Result<()> {
    for input_string in ["1234.50", "0", "-15.25", "1000000.0001"] {
        let first = Numeric::parse(input_string, BalanceCleanup::PlainNumeric);
        let second = Numeric::parse(&first.to_string(), BalanceCleanup::PlainNumeric);

        assert_eq!(first, second);
        assert_eq!(first.to_string(), input_string);
    }

    Ok(())
}

#[test]
fn test_missing_counts_as_zero_but_renders_empty() {
    let missing = Numeric::Missing;

    assert_eq!(missing.or_zero(), Decimal::ZERO);
    assert_eq!(missing.to_string(), "");
    assert_eq!(Numeric::default().to_string(), "0");
}
