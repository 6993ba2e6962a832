use rust_decimal::Decimal;

/// The four figures derived from a ledger. All of them are zero together or computed together.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SummaryMetrics {
    /// Sum of every debit cell.
    pub total_debit: Decimal,
    /// Sum of every credit cell.
    pub total_credit: Decimal,
    /// First row's balance, or the balance before it when back-calculated.
    pub opening_balance: Decimal,
    /// Balance of the last transaction.
    pub closing_balance: Decimal
}

impl SummaryMetrics {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Labelled values in the order they are presented to the user.
    pub fn entries(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Total Credit", self.total_credit),
            ("Total Debit", self.total_debit),
            ("Opening Balance", self.opening_balance),
            ("Closing Balance", self.closing_balance)
        ]
    }
}

/// Account metadata recovered from the statement's first page.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AccountInfo {
    /// Name printed after the account holder label, if found.
    pub holder_name: Option<String>,
    /// Digits printed after the account number label, if found.
    pub account_number: Option<String>
}
