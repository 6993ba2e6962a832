use tracing::debug;

use crate::models::{is_blank_row, row_contains, TransactionTable};

/// Removes rows that are not transactions.
///
/// Noise-marker and blank rows go first; only the surviving rows are checked
/// for the end marker, so a row that is both noise and end marker never
/// truncates the table.
pub fn filter_noise(table: TransactionTable, noise_markers: &[String], end_marker: Option<&str>) -> TransactionTable {
    let TransactionTable { labels, rows } = table;
    let before = rows.len();

    let markers: Vec<String> = noise_markers.iter()
        .map(|marker| marker.trim().to_lowercase())
        .filter(|marker| !marker.is_empty())
        .collect();

    let mut rows: Vec<Vec<String>> = rows.into_iter()
        .filter(|row| !is_blank_row(row))
        .filter(|row| !markers.iter().any(|marker| row_contains(row, marker)))
        .collect();

    let end_marker = end_marker
        .map(|marker| marker.trim().to_lowercase())
        .filter(|marker| !marker.is_empty());

    if let Some(end) = end_marker {
        if let Some(position) = rows.iter().position(|row| row_contains(row, &end)) {
            debug!("End marker '{end}' found, dropping {} trailing rows", rows.len() - position);
            rows.truncate(position);
        }
    }

    debug!("Noise filter kept {} of {before} rows", rows.len());

    TransactionTable::new(labels, rows)
}
