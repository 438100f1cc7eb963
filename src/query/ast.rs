//! Query building blocks
//!
//! Typed predicates, projections and sorts rendered to the filter,
//! projection and sort documents the store understands.

use mongodb::bson::{Bson, Document};

use crate::books::fields;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Bson),
    /// Greater than: field > value
    Gt(Bson),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns the store's operator name
    pub fn operator(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "$eq",
            FilterOp::Gt(_) => "$gt",
        }
    }

    /// Returns the compared value
    pub fn value(&self) -> &Bson {
        match self {
            FilterOp::Eq(v) | FilterOp::Gt(v) => v,
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    /// Create a range predicate (gt)
    pub fn gt(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value.into()),
        }
    }

    /// `{field: {op: value}}` on its own
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(self.field.clone(), operator_doc(&self.op));
        doc
    }
}

/// Conjunction of predicates. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a predicate (AND semantics)
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Renders the filter document.
    ///
    /// A lone equality stays in the short `{field: value}` form. Distinct
    /// operators on one field share a single operator document. A repeated
    /// operator on a field goes into a top-level `$and` so that no predicate
    /// is lost.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        let mut repeated = Vec::new();

        for pred in &self.predicates {
            let merged = match filter.remove(&pred.field) {
                None if pred.op.is_equality() => pred.op.value().clone(),
                None => Bson::Document(operator_doc(&pred.op)),
                Some(Bson::Document(mut ops)) if is_operator_doc(&ops) => {
                    if ops.contains_key(pred.op.operator()) {
                        repeated.push(pred.to_document());
                    } else {
                        ops.insert(pred.op.operator(), pred.op.value().clone());
                    }
                    Bson::Document(ops)
                }
                Some(previous) if pred.op.is_equality() => {
                    repeated.push(pred.to_document());
                    previous
                }
                Some(previous) => {
                    let mut ops = Document::new();
                    ops.insert("$eq", previous);
                    ops.insert(pred.op.operator(), pred.op.value().clone());
                    Bson::Document(ops)
                }
            };
            filter.insert(pred.field.clone(), merged);
        }

        if !repeated.is_empty() {
            filter.insert("$and", repeated);
        }

        filter
    }
}

impl From<Predicate> for Filter {
    fn from(predicate: Predicate) -> Self {
        Filter::all().and(predicate)
    }
}

fn operator_doc(op: &FilterOp) -> Document {
    let mut doc = Document::new();
    doc.insert(op.operator(), op.value().clone());
    doc
}

fn is_operator_doc(doc: &Document) -> bool {
    !doc.is_empty() && doc.keys().all(|k| k.starts_with('$'))
}

/// Returned fields of a find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    include: Vec<String>,
    suppress_id: bool,
}

impl Projection {
    /// Return only the named fields (and `_id`, unless suppressed)
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: fields.into_iter().map(Into::into).collect(),
            suppress_id: false,
        }
    }

    /// Leave the internal identifier out of the results
    pub fn without_id(mut self) -> Self {
        self.suppress_id = true;
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.include
    }

    pub fn suppresses_id(&self) -> bool {
        self.suppress_id
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for field in &self.include {
            doc.insert(field.clone(), 1);
        }
        if self.suppress_id {
            doc.insert(fields::ID, 0);
        }
        doc
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Key value used in sort and index documents
    pub fn as_key(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(self.field.clone(), self.direction.as_key());
        doc
    }
}
