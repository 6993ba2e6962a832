use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No transactions extracted: the document produced no tables")]
    NoTableFound,
    #[error("Transaction header row not found (marker '{marker}')")]
    HeaderNotFound {
        marker: String
    },
    #[error("{0}")]
    Source(#[from] SourceError),
    #[error("Processing failed: {0}")]
    Processing(String)
}

impl PipelineError {
    pub fn header_not_found(marker: &str) -> Self {
        Self::HeaderNotFound { marker: marker.to_string() }
    }
}
