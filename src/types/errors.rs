use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("Numeric error: value is empty")]
    Empty,
    #[error("Numeric error: value is 'nan'")]
    NotANumber,
    #[error("Numeric error: {0}")]
    InvalidFormat(String)
}
