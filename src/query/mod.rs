//! Query building blocks for the bookstore demo
//!
//! Everything here is pure: it renders filters, options, pipelines, index
//! keys and explain commands as BSON, and reads explain responses back.
//! Nothing in this module talks to the store.

mod ast;
mod explain;
mod find;
mod index;
pub mod pipelines;

pub use ast::{Filter, FilterOp, Predicate, Projection, SortDirection, SortSpec};
pub use explain::{execution_stats, explain_command, ExplainSummary};
pub use find::FindSpec;
pub use index::IndexSpec;
