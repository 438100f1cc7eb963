//! bookstore-queries - illustrative document store queries over a bookstore
//!
//! Opens one connection, runs a fixed sequence of filters, projections,
//! sorts, pagination, aggregations, index creation and an explain plan
//! against the `books` collection, reports each result, and closes the
//! connection.

pub mod books;
pub mod cli;
pub mod observability;
pub mod query;
pub mod runner;
pub mod store;
