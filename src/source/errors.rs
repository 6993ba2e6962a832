use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Statement [{}] does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read statement [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Could not parse extracted table [{}]: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error
    }
}
