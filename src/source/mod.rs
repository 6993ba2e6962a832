mod account_info;
mod csv_source;
mod errors;

use std::path::Path;

use crate::models::RawTable;

pub use account_info::{extract_account_info, SidecarOcrSource};
pub use csv_source::CsvTableSource;
pub use errors::SourceError;

/// Boundary with the table-detection engine: every table of a document, in page order.
pub trait TableSource: Send + Sync + 'static {
    fn tables(&self, document: &Path) -> Result<Vec<RawTable>, SourceError>;
}

/// Boundary with the OCR engine. Failures are absorbed and reported as `None`.
pub trait OcrTextSource: Send + Sync + 'static {
    fn first_page_text(&self, document: &Path, resolution_hint: u32) -> Option<String>;
}
