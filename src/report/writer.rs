use std::io::Write;

use csv::Writer;

use crate::models::{AccountInfo, CanonicalLedger, SummaryMetrics};

/// Renders the ledger as CSV under the profile's schema names. A missing balance is an empty cell.
pub fn write_ledger<W: Write>(writer: W, ledger: &CanonicalLedger) -> csv::Result<()> {
    let mut output = Writer::from_writer(writer);

    output.write_record(ledger.schema.names())?;

    for row in &ledger.rows {
        output.write_record(row.cells())?;
    }

    output.flush()?;

    Ok(())
}

pub fn write_summary<W: Write>(writer: W, metrics: &SummaryMetrics) -> csv::Result<()> {
    let mut output = Writer::from_writer(writer);

    output.write_record(["Metric", "Value"])?;

    for (label, value) in metrics.entries() {
        output.write_record([label.to_string(), value.to_string()])?;
    }

    output.flush()?;

    Ok(())
}

/// One `label: value` line per recovered field; nothing at all when the OCR text had neither.
pub fn write_account_info<W: Write>(mut writer: W, account: &AccountInfo) -> std::io::Result<()> {
    if let Some(name) = &account.holder_name {
        writeln!(writer, "Account Holder: {name}")?;
    }

    if let Some(number) = &account.account_number {
        writeln!(writer, "Account Number: {number}")?;
    }

    Ok(())
}
