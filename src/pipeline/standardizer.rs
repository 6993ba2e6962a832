use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{cell, CanonicalField, CanonicalLedger, LedgerRow, TransactionTable};
use crate::pipeline::fuzzy::weighted_ratio;
use crate::profiles::{BankProfile, DebitCreditMode};
use crate::types::Numeric;

/// Minimum fuzzy score (exclusive) for a raw label to be accepted for a canonical field.
pub const MATCH_THRESHOLD: u8 = 60;

/// A deduplicated raw column and its normalized label.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawColumn {
    pub index: usize,
    pub label: String
}

/// Columns of an indicator+amount layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct IndicatorColumns {
    indicator: usize,
    amount: usize
}

/// Lower-cases, joins whitespace runs with `_` and drops periods: `"Txn No."` becomes `"txn_no"`.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .replace('.', "")
}

/// Keeps the first occurrence of each exact raw label, then normalizes it.
pub fn raw_columns(labels: &[String]) -> Vec<RawColumn> {
    let mut seen = HashSet::new();

    labels.iter()
        .enumerate()
        .filter(|(_, label)| seen.insert(label.as_str()))
        .map(|(index, label)| RawColumn { index, label: normalize_label(label) })
        .collect()
}

/// Maps the filtered table onto the profile's canonical schema.
///
/// Never fails: a table whose labels match nothing still yields a ledger with
/// every field present (empty text, balance `0`).
pub fn standardize(table: &TransactionTable, profile: &BankProfile) -> CanonicalLedger {
    let columns = raw_columns(&table.labels);

    let indicator_columns = match profile.debit_credit_mode {
        DebitCreditMode::SeparateColumns => None,
        DebitCreditMode::IndicatorPlusAmount => {
            let detected = detect_indicator_columns(&columns, profile);

            if detected.is_none() {
                warn!("Profile [{}] expects indicator and amount columns but none were found, matching debit/credit by name", profile.id);
            }

            detected
        }
    };

    let mapping = match_fields(&columns, profile, indicator_columns);

    let rows = table.rows.iter()
        .map(|row| build_row(row, &mapping, indicator_columns, profile))
        .collect::<Vec<_>>();

    debug!("Standardized {} rows for profile [{}]", rows.len(), profile.id);

    CanonicalLedger::new(profile.schema.clone(), rows)
}

fn detect_indicator_columns(columns: &[RawColumn], profile: &BankProfile) -> Option<IndicatorColumns> {
    let find = |labels: &[String]| {
        columns.iter()
            .find(|column| labels.iter().any(|label| label == &column.label))
            .map(|column| column.index)
    };

    let indicator = find(&profile.indicator_labels)?;
    let amount = find(&profile.amount_labels)?;

    Some(IndicatorColumns { indicator, amount })
}

/// Assigns raw columns to canonical fields in priority order.
///
/// A field only ever takes its single best-scoring label. When that label was
/// already claimed by an earlier field the field stays unmapped.
fn match_fields(columns: &[RawColumn], profile: &BankProfile, indicator_columns: Option<IndicatorColumns>) -> HashMap<CanonicalField, usize> {
    let mut mapping = HashMap::new();
    let mut consumed = HashSet::new();

    let candidates: Vec<&RawColumn> = columns.iter()
        .filter(|column| match indicator_columns {
            Some(pair) => column.index != pair.indicator && column.index != pair.amount,
            None => true
        })
        .collect();

    for field in CanonicalField::ALL {
        if indicator_columns.is_some() && matches!(field, CanonicalField::Debit | CanonicalField::Credit) {
            continue;
        }

        let names = profile.candidates(field);
        let Some((column, score)) = best_match(&names, &candidates) else {
            continue
        };

        if score > MATCH_THRESHOLD && consumed.insert(column.index) {
            debug!("Field [{field:?}] mapped to column '{}' (score {score})", column.label);
            mapping.insert(field, column.index);
        } else {
            debug!("Field [{field:?}] left unmapped, best column '{}' (score {score})", column.label);
        }
    }

    mapping
}

/// Highest-scoring column for any of `names`; the earliest column wins ties.
fn best_match<'a>(names: &[&str], columns: &[&'a RawColumn]) -> Option<(&'a RawColumn, u8)> {
    let mut best: Option<(&RawColumn, u8)> = None;

    for &column in columns {
        let score = names.iter()
            .map(|name| weighted_ratio(name, &column.label))
            .max()
            .unwrap_or(0);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((column, score));
        }
    }

    best
}

fn build_row(row: &[String], mapping: &HashMap<CanonicalField, usize>, indicator_columns: Option<IndicatorColumns>, profile: &BankProfile) -> LedgerRow {
    let text = |field: CanonicalField| {
        mapping.get(&field)
            .map(|&index| cell(row, index).trim().to_string())
            .unwrap_or_default()
    };

    let (debit, credit) = match indicator_columns {
        Some(pair) => split_by_indicator(row, pair, profile),
        None => (text(CanonicalField::Debit), text(CanonicalField::Credit))
    };

    let balance = match mapping.get(&CanonicalField::Balance) {
        Some(&index) => Numeric::parse(cell(row, index), profile.balance_cleanup),
        None => Numeric::default()
    };

    LedgerRow {
        date: text(CanonicalField::Date),
        description: text(CanonicalField::Description),
        debit,
        credit,
        balance
    }
}

/// Routes the shared amount to debit or credit. Unknown indicators leave both empty.
fn split_by_indicator(row: &[String], pair: IndicatorColumns, profile: &BankProfile) -> (String, String) {
    let indicator = cell(row, pair.indicator).trim();
    let amount = cell(row, pair.amount).trim().to_string();

    if indicator.eq_ignore_ascii_case(profile.indicator_values.debit.trim()) {
        (amount, String::new())
    } else if indicator.eq_ignore_ascii_case(profile.indicator_values.credit.trim()) {
        (String::new(), amount)
    } else {
        (String::new(), String::new())
    }
}
