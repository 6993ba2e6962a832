use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::models::{CanonicalLedger, SummaryMetrics};
use crate::profiles::OpeningBalancePolicy;
use crate::types::{BalanceCleanup, Numeric};

/// Derives the four summary figures from a standardized ledger.
///
/// A ledger without rows, or without a single dated row, yields all zeros.
pub fn calculate_metrics(ledger: &CanonicalLedger, policy: OpeningBalancePolicy) -> SummaryMetrics {
    let (Some(first), Some(last)) = (ledger.rows.first(), ledger.rows.last()) else {
        debug!("Ledger is empty, metrics default to zero");
        return SummaryMetrics::zero()
    };

    if ledger.rows.iter().all(|row| row.date.trim().is_empty()) {
        debug!("Ledger has no dated rows, metrics default to zero");
        return SummaryMetrics::zero()
    }

    let total_debit = sum(ledger.rows.iter().map(|row| clean_amount(&row.debit)));
    let total_credit = sum(ledger.rows.iter().map(|row| clean_amount(&row.credit)));

    let first_balance = first.balance.or_zero();

    let opening_balance = match policy {
        OpeningBalancePolicy::FirstRowBalance => first_balance,
        OpeningBalancePolicy::BackCalculated => {
            let first_debit = clean_amount(&first.debit);
            let first_credit = clean_amount(&first.credit);

            first_balance.checked_sub(first_credit)
                .and_then(|value| value.checked_add(first_debit))
                .unwrap_or_else(|| {
                    error!("Opening balance overflowed while back-calculating, using first row balance");
                    first_balance
                })
        }
    };

    SummaryMetrics {
        total_debit,
        total_credit,
        opening_balance,
        closing_balance: last.balance.or_zero()
    }
}

/// Debit/credit cells: commas and whitespace stripped, empty or unreadable counts as zero.
pub fn clean_amount(text: &str) -> Decimal {
    Numeric::parse(text, BalanceCleanup::PlainNumeric).or_zero()
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or_else(|| {
            error!("Total overflowed while adding {amount}, value skipped");
            total
        })
    })
}
