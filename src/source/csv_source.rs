use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::models::RawTable;
use crate::source::errors::SourceError;
use crate::source::TableSource;

/// Reads tables that the extraction engine exported as headerless CSV.
///
/// A file is one table. A directory holds one table per `*.csv` file, taken
/// in file-name order (`page_01.csv`, `page_02.csv`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableSource;

impl TableSource for CsvTableSource {
    fn tables(&self, document: &Path) -> Result<Vec<RawTable>, SourceError> {
        if document.is_dir() {
            let files = table_files(document)?;
            debug!("Found {} table files in [{}]", files.len(), document.display());

            return files.iter().map(|path| read_table(path)).collect();
        }

        if document.is_file() {
            return Ok(vec![read_table(document)?]);
        }

        Err(SourceError::NotFound(document.to_path_buf()))
    }
}

fn table_files(directory: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let io_error = |source| SourceError::Io { path: directory.to_path_buf(), source };

    let mut files = Vec::new();

    for entry in fs::read_dir(directory).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

        if is_csv && path.is_file() {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

fn read_table(path: &Path) -> Result<RawTable, SourceError> {
    let csv_error = |source| SourceError::Csv { path: path.to_path_buf(), source };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("Read {} rows from [{}]", rows.len(), path.display());

    Ok(rows)
}
