//! Store errors
//!
//! Every variant is the same category to the caller: the operation failed.
//! Variants only keep the driver's cause and which call produced it.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error code shared by every store failure
pub const OPERATION_FAILED: &str = "BOOKSTORE_OPERATION_FAILED";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved
    #[error("Invalid connection string: {0}")]
    InvalidUri(#[source] mongodb::error::Error),

    /// The store did not answer the connectivity check
    #[error("Failed to connect: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// A query, write, aggregation or index call failed
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
}

impl StoreError {
    pub(crate) fn operation(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |source| StoreError::Operation { operation, source }
    }

    /// Error code string
    pub fn code(&self) -> &'static str {
        OPERATION_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn driver_error() -> mongodb::error::Error {
        io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused").into()
    }

    #[test]
    fn test_single_error_code() {
        let errors = [
            StoreError::Connect(driver_error()),
            StoreError::operation("find")(driver_error()),
        ];
        for err in &errors {
            assert_eq!(err.code(), OPERATION_FAILED);
        }
    }

    #[test]
    fn test_operation_message_names_call() {
        let err = StoreError::operation("aggregate")(driver_error());
        assert!(err.to_string().starts_with("aggregate failed: "));
    }
}
