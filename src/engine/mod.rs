mod statement_engine;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::models::{AccountInfo, CanonicalLedger, SummaryMetrics};

pub use statement_engine::{StatementEngine, DEFAULT_RESOLUTION_HINT};

/// Everything produced for one statement document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatementReport {
    /// Path the tables were read from.
    pub document: PathBuf,
    /// Display name of the profile used.
    pub bank: String,
    pub ledger: CanonicalLedger,
    pub metrics: SummaryMetrics,
    /// Holder and number from the first page, when OCR text was available.
    pub account: AccountInfo
}
