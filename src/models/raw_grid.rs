/// One table exactly as the extraction engine emitted it (possibly ragged).
pub type RawTable = Vec<Vec<String>>;

/// Every extracted table of one document, concatenated in page order.
///
/// The grid is never mutated once handed to the pipeline; each stage builds
/// its own output from it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>
}

impl RawGrid {
    /// Wraps rows verbatim, blank rows included.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Concatenates tables in order and drops rows that are empty across every cell.
    pub fn from_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = RawTable>,
    {
        let rows = tables.into_iter()
            .flatten()
            .filter(|row| !is_blank_row(row))
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows below the located header, keyed by the header's labels.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionTable {
    /// Trimmed header cells.
    pub labels: Vec<String>,
    /// Every row below the header, untouched.
    pub rows: Vec<Vec<String>>
}

impl TransactionTable {
    pub fn new(labels: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { labels, rows }
    }
}

/// Reads a cell, treating cells past the end of a short row as empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}

/// Case-insensitive substring search across every cell. `needle` must already be lower-case.
pub fn row_contains(row: &[String], needle: &str) -> bool {
    row.iter().any(|value| value.to_lowercase().contains(needle))
}
