use super::{write_account_info, write_ledger, write_summary};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{AccountInfo, CanonicalLedger, CanonicalSchema, LedgerRow, SummaryMetrics};
use crate::types::Numeric;

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<String> {
    let mut buffer = Vec::new();
    write(&mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}

#[test]
fn test_ledger_is_rendered_under_schema_names() -> Result<()> {
    let schema = CanonicalSchema::new("date", "particulars", "debit", "credit", "balance");
    let ledger = CanonicalLedger::new(schema, vec![
        LedgerRow {
            date: "02-04-2024".to_string(),
            description: "NEFT, Rent".to_string(),
            debit: "200.00".to_string(),
            credit: String::new(),
            balance: Numeric::Value(decimal("800.00"))
        },
        LedgerRow {
            date: "03-04-2024".to_string(),
            description: "Cash".to_string(),
            debit: String::new(),
            credit: "50".to_string(),
            balance: Numeric::Missing
        }
    ]);

    let text = render(|buffer| Ok(write_ledger(buffer, &ledger)?))?;

    assert_eq!(text, "date,particulars,debit,credit,balance\n02-04-2024,\"NEFT, Rent\",200.00,,800.00\n03-04-2024,Cash,,50,\n");

    Ok(())
}

#[test]
fn test_empty_ledger_still_has_header() -> Result<()> {
    let ledger = CanonicalLedger::new(CanonicalSchema::standard(), Vec::new());

    let text = render(|buffer| Ok(write_ledger(buffer, &ledger)?))?;

    assert_eq!(text, "date,description,debit,credit,balance\n");

    Ok(())
}

#[test]
fn test_summary_lists_metrics_in_presentation_order() -> Result<()> {
    let metrics = SummaryMetrics {
        total_debit: decimal("200.00"),
        total_credit: decimal("500.00"),
        opening_balance: decimal("800.00"),
        closing_balance: decimal("1300.00")
    };

    let text = render(|buffer| Ok(write_summary(buffer, &metrics)?))?;

    assert_eq!(text, "Metric,Value\nTotal Credit,500.00\nTotal Debit,200.00\nOpening Balance,800.00\nClosing Balance,1300.00\n");

    Ok(())
}

#[test]
fn test_zero_summary() -> Result<()> {
    let text = render(|buffer| Ok(write_summary(buffer, &SummaryMetrics::zero())?))?;

    assert_eq!(text, "Metric,Value\nTotal Credit,0\nTotal Debit,0\nOpening Balance,0\nClosing Balance,0\n");

    Ok(())
}

#[test]
fn test_account_info_lines() -> Result<()> {
    let full = AccountInfo { holder_name: Some("RAVI KUMAR".to_string()), account_number: Some("1234".to_string()) };
    let partial = AccountInfo { holder_name: None, account_number: Some("1234".to_string()) };

    assert_eq!(render(|buffer| Ok(write_account_info(buffer, &full)?))?, "Account Holder: RAVI KUMAR\nAccount Number: 1234\n");
    assert_eq!(render(|buffer| Ok(write_account_info(buffer, &partial)?))?, "Account Number: 1234\n");
    assert_eq!(render(|buffer| Ok(write_account_info(buffer, &AccountInfo::default())?))?, "");

    Ok(())
}
