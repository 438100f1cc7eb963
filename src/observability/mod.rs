//! Observability for the query runner
//!
//! - Structured JSON logging on stderr
//! - Begin/complete scopes with elapsed time
//!
//! ```ignore
//! use bookstore_queries::observability::{Logger, ObservationScope};
//!
//! Logger::info("STORE_CONNECTED", &[("database", "plp_bookstore")]);
//!
//! let scope = ObservationScope::with_fields("STEP", &[("label", "Fiction Books")]);
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
