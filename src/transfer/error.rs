use crate::api::{ApiError, ErrorKind};
use thiserror::Error;

/// Failure of a whole transfer operation
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    #[error("No subscriptions found for this account")]
    EmptyResult,
    #[error("Sheet is empty or only has a header row")]
    EmptySheet,
    #[error("No valid channel IDs found (IDs must start with UC or HC)")]
    NoValidIdentifiers,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::EmptyResult => ErrorKind::EmptyResult,
            TransferError::EmptySheet => ErrorKind::EmptySheet,
            TransferError::NoValidIdentifiers => ErrorKind::NoValidIdentifiers,
            TransferError::Api(error) => error.kind,
        }
    }
}
