mod ledger;
mod raw_grid;
mod summary;

pub use ledger::{CanonicalField, CanonicalLedger, CanonicalSchema, LedgerRow};
pub use raw_grid::{cell, is_blank_row, row_contains, RawGrid, RawTable, TransactionTable};
pub use summary::{AccountInfo, SummaryMetrics};
