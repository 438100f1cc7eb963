//! Operations the runner can issue and what they produce.

use mongodb::bson::{Bson, Document};
use serde_json::{json, Value};

use crate::query::{pipelines, ExplainSummary, Filter, FindSpec, IndexSpec};

/// One call into the store
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Find and materialize every matching document
    Find(FindSpec),
    /// Update the first document matching `filter`
    UpdateOne { filter: Filter, update: Document },
    /// Delete the first document matching `filter`
    DeleteOne { filter: Filter },
    /// Run an aggregation pipeline
    Aggregate(Vec<Document>),
    /// Create an index (idempotent)
    CreateIndex(IndexSpec),
    /// Explain a find with execution statistics
    Explain(FindSpec),
}

impl Operation {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Find(_) => "find",
            Operation::UpdateOne { .. } => "update_one",
            Operation::DeleteOne { .. } => "delete_one",
            Operation::Aggregate(_) => "aggregate",
            Operation::CreateIndex(_) => "create_index",
            Operation::Explain(_) => "explain",
        }
    }

    /// Comma-separated pipeline stages of an aggregation
    pub fn stages(&self) -> Option<String> {
        match self {
            Operation::Aggregate(pipeline) => Some(pipelines::stage_names(pipeline).join(",")),
            _ => None,
        }
    }
}

/// Fully materialized result of one operation
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Documents(Vec<Document>),
    Updated { matched: u64, modified: u64 },
    Deleted { deleted: u64 },
    IndexCreated { name: String },
    Plan {
        summary: ExplainSummary,
        execution_stats: Option<Document>,
    },
}

impl StepOutcome {
    /// JSON rendering; documents use relaxed extended JSON
    pub fn to_json(&self) -> Value {
        match self {
            StepOutcome::Documents(docs) => Value::Array(docs.iter().map(document_json).collect()),
            StepOutcome::Updated { matched, modified } => json!({
                "matchedCount": matched,
                "modifiedCount": modified,
            }),
            StepOutcome::Deleted { deleted } => json!({ "deletedCount": deleted }),
            StepOutcome::IndexCreated { name } => json!({ "indexName": name }),
            StepOutcome::Plan {
                summary,
                execution_stats,
            } => json!({
                "summary": serde_json::to_value(summary).unwrap_or(Value::Null),
                "executionStats": execution_stats.as_ref().map(document_json),
            }),
        }
    }

    /// Size of the outcome for log lines: documents returned or affected
    pub fn count(&self) -> u64 {
        match self {
            StepOutcome::Documents(docs) => docs.len() as u64,
            StepOutcome::Updated { modified, .. } => *modified,
            StepOutcome::Deleted { deleted } => *deleted,
            StepOutcome::IndexCreated { .. } => 1,
            StepOutcome::Plan { summary, .. } => summary.n_returned,
        }
    }
}

fn document_json(doc: &Document) -> Value {
    Bson::Document(doc.clone()).into_relaxed_extjson()
}
