//! Index specifications

use mongodb::bson::Document;
use mongodb::IndexModel;

use super::ast::SortDirection;

/// Ordered index keys. Creating the same spec twice is a no-op on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    keys: Vec<(String, SortDirection)>,
}

impl IndexSpec {
    /// Single-field ascending index
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            keys: vec![(field.into(), SortDirection::Asc)],
        }
    }

    /// Compound ascending index, keys in the given order
    pub fn compound<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: fields
                .into_iter()
                .map(|f| (f.into(), SortDirection::Asc))
                .collect(),
        }
    }

    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }

    /// The name the store derives for this index, e.g. `author_1_published_year_1`
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, dir)| format!("{}_{}", field, dir.as_key()))
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn keys_document(&self) -> Document {
        let mut doc = Document::new();
        for (field, direction) in &self.keys {
            doc.insert(field.clone(), direction.as_key());
        }
        doc
    }

    pub fn to_model(&self) -> IndexModel {
        IndexModel::builder().keys(self.keys_document()).build()
    }
}
