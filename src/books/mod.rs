//! Book Record type and the sample dataset

mod fixture;
mod model;

pub use fixture::sample_books;
pub use model::{fields, Book};
