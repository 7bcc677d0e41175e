use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid month value: {0}")]
    InvalidMonth(String),
}
