use tracing::debug;

use crate::models::{row_contains, RawGrid, TransactionTable};
use crate::pipeline::PipelineError;

/// Finds the first row mentioning `marker` and splits the grid there.
///
/// The header row's cells become the labels of every following row; the
/// header and everything above it are discarded.
///
/// # Errors
/// Returns `PipelineError::HeaderNotFound` when no row contains the marker.
pub fn locate_header(grid: &RawGrid, marker: &str) -> Result<TransactionTable, PipelineError> {
    let needle = marker.trim().to_lowercase();
    let rows = grid.rows();

    let Some(index) = rows.iter().position(|row| row_contains(row, &needle)) else {
        return Err(PipelineError::header_not_found(marker))
    };

    let labels = rows[index].iter().map(|label| label.trim().to_string()).collect();
    let body = rows[index + 1..].to_vec();

    debug!("Header row found at [{index}] for marker '{marker}', {} rows follow", body.len());

    Ok(TransactionTable::new(labels, body))
}
