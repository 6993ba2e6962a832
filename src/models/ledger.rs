use serde::{Deserialize, Serialize};

use crate::types::Numeric;

/// The five fields every bank's table is normalized into, in matching priority order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Date,
    Description,
    Debit,
    Credit,
    Balance
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::Date,
        CanonicalField::Description,
        CanonicalField::Debit,
        CanonicalField::Credit,
        CanonicalField::Balance
    ];
}

/// Display names a bank uses for the canonical fields.
///
/// The names double as the fuzzy-matching seeds for each field, which is why
/// some banks carry `particulars` or `dr_amount` here instead of the defaults.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSchema {
    /// Transaction date column name.
    pub date: String,
    /// Narration or particulars column name.
    pub description: String,
    /// Withdrawal amount column name.
    pub debit: String,
    /// Deposit amount column name.
    pub credit: String,
    /// Running balance column name.
    pub balance: String
}

impl CanonicalSchema {
    pub fn new(date: &str, description: &str, debit: &str, credit: &str, balance: &str) -> Self {
        Self {
            date: date.to_string(),
            description: description.to_string(),
            debit: debit.to_string(),
            credit: credit.to_string(),
            balance: balance.to_string()
        }
    }

    pub fn standard() -> Self {
        Self::new("date", "description", "debit", "credit", "balance")
    }

    pub fn name(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Date => &self.date,
            CanonicalField::Description => &self.description,
            CanonicalField::Debit => &self.debit,
            CanonicalField::Credit => &self.credit,
            CanonicalField::Balance => &self.balance
        }
    }

    pub fn names(&self) -> [&str; 5] {
        CanonicalField::ALL.map(|field| self.name(field))
    }
}

impl Default for CanonicalSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// A single standardized transaction.
///
/// `debit` and `credit` stay as trimmed text until the metrics stage;
/// `balance` is cleaned as soon as the row is built.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LedgerRow {
    /// Date text as printed on the statement.
    pub date: String,
    /// Narration of the transaction.
    pub description: String,
    /// Withdrawn amount, empty when the row is a credit.
    pub debit: String,
    /// Deposited amount, empty when the row is a debit.
    pub credit: String,
    /// Running balance after this transaction.
    pub balance: Numeric
}

impl LedgerRow {
    /// Cell values in canonical field order, ready for rendering.
    pub fn cells(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.description.clone(),
            self.debit.clone(),
            self.credit.clone(),
            self.balance.to_string()
        ]
    }
}

/// Every transaction of one statement, in statement order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CanonicalLedger {
    /// Names the ledger is rendered under.
    pub schema: CanonicalSchema,
    /// Transactions in the order they appeared.
    pub rows: Vec<LedgerRow>
}

impl CanonicalLedger {
    pub fn new(schema: CanonicalSchema, rows: Vec<LedgerRow>) -> Self {
        Self { schema, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
