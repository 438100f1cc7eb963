//! Store access
//!
//! A thin wrapper over the document store client. One [`BookStore`] per
//! process, opened at startup and closed once at the end.

mod book_store;
mod errors;

pub use book_store::{BookStore, StoreConfig, DEFAULT_COLLECTION, DEFAULT_DATABASE};
pub use errors::{StoreError, StoreResult, OPERATION_FAILED};
