mod errors;
mod fuzzy;
mod header_locator;
mod metrics_calculator;
mod noise_filter;
mod standardizer;

use tracing::debug;

use crate::models::{CanonicalLedger, RawGrid, SummaryMetrics};
use crate::profiles::BankProfile;

pub use errors::PipelineError;
pub use header_locator::locate_header;
pub use metrics_calculator::calculate_metrics;
pub use noise_filter::filter_noise;
pub use standardizer::standardize;

/// Output of one pipeline run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NormalizedStatement {
    pub ledger: CanonicalLedger,
    pub metrics: SummaryMetrics
}

/// Runs header location, noise filtering, standardization and metrics, strictly in that order.
///
/// # Errors
/// - `PipelineError::NoTableFound` when the grid has no rows.
/// - `PipelineError::HeaderNotFound` when no row carries the profile's header marker.
///   No partial ledger is produced in either case.
pub fn process(grid: &RawGrid, profile: &BankProfile) -> Result<NormalizedStatement, PipelineError> {
    if grid.is_empty() {
        return Err(PipelineError::NoTableFound)
    }

    debug!("Processing {} raw rows with profile [{}]", grid.len(), profile.id);

    let table = locate_header(grid, &profile.header_marker)?;
    let table = filter_noise(table, &profile.noise_markers, profile.end_marker.as_deref());
    let ledger = standardize(&table, profile);
    let metrics = calculate_metrics(&ledger, profile.opening_balance_policy);

    Ok(NormalizedStatement { ledger, metrics })
}
