//! Explain output for find queries
//!
//! Builds the `explain` command and condenses the store's answer into the
//! few numbers that show whether an index served the query.

use std::fmt;

use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;

use super::find::FindSpec;

/// Stages that read data directly from a collection or an index.
const ACCESS_STAGES: &[&str] = &[
    "IXSCAN",
    "EXPRESS_IXSCAN",
    "IDHACK",
    "EXPRESS_IDHACK",
    "COUNT_SCAN",
    "COLLSCAN",
];

/// Builds the `explain` command for a find at `executionStats` verbosity.
pub fn explain_command(collection: &str, spec: &FindSpec) -> Document {
    let mut find = doc! {
        "find": collection,
        "filter": spec.filter_document(),
    };
    if let Some(projection) = &spec.projection {
        find.insert("projection", projection.to_document());
    }
    if let Some(sort) = &spec.sort {
        find.insert("sort", sort.to_document());
    }
    if let Some(skip) = spec.skip {
        find.insert("skip", i64::try_from(skip).unwrap_or(i64::MAX));
    }
    if let Some(limit) = spec.limit {
        find.insert("limit", limit);
    }

    doc! {
        "explain": find,
        "verbosity": "executionStats",
    }
}

/// Condensed execution statistics of an explained query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainSummary {
    /// Access stage of the winning plan (`IXSCAN`, `COLLSCAN`, ...)
    pub stage: Option<String>,
    /// Index used by the access stage, if any
    pub index_name: Option<String>,
    pub n_returned: u64,
    pub total_keys_examined: u64,
    pub total_docs_examined: u64,
    pub execution_time_millis: u64,
}

impl ExplainSummary {
    /// Reads the summary out of an explain response.
    pub fn from_explain(explain: &Document) -> Self {
        let access = explain
            .get_document("queryPlanner")
            .ok()
            .and_then(|planner| planner.get_document("winningPlan").ok())
            .and_then(find_access_stage);

        let stats = execution_stats(explain);
        let number = |key: &str| stats.and_then(|s| as_u64(s.get(key))).unwrap_or(0);

        Self {
            stage: access.and_then(|s| s.get_str("stage").ok()).map(String::from),
            index_name: access
                .and_then(|s| s.get_str("indexName").ok())
                .map(String::from),
            n_returned: number("nReturned"),
            total_keys_examined: number("totalKeysExamined"),
            total_docs_examined: number("totalDocsExamined"),
            execution_time_millis: number("executionTimeMillis"),
        }
    }

    /// True if the winning plan read through an index
    pub fn uses_index(&self) -> bool {
        self.index_name.is_some() || matches!(self.stage.as_deref(), Some(s) if s != "COLLSCAN")
    }
}

impl fmt::Display for ExplainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stage={} index={} returned={} keys_examined={} docs_examined={} time_ms={}",
            self.stage.as_deref().unwrap_or("UNKNOWN"),
            self.index_name.as_deref().unwrap_or("-"),
            self.n_returned,
            self.total_keys_examined,
            self.total_docs_examined,
            self.execution_time_millis,
        )
    }
}

/// The `executionStats` section of an explain response.
pub fn execution_stats(explain: &Document) -> Option<&Document> {
    explain.get_document("executionStats").ok()
}

/// Depth-first search for the stage that touches storage.
///
/// Handles the `queryPlan` wrapper of the slot-based engine and both
/// `inputStage` and `inputStages` children.
fn find_access_stage(plan: &Document) -> Option<&Document> {
    if let Ok(inner) = plan.get_document("queryPlan") {
        return find_access_stage(inner);
    }

    if let Ok(stage) = plan.get_str("stage") {
        if ACCESS_STAGES.contains(&stage) {
            return Some(plan);
        }
    }

    if let Ok(child) = plan.get_document("inputStage") {
        if let Some(found) = find_access_stage(child) {
            return Some(found);
        }
    }

    plan.get_array("inputStages")
        .ok()?
        .iter()
        .filter_map(Bson::as_document)
        .find_map(find_access_stage)
}

fn as_u64(value: Option<&Bson>) -> Option<u64> {
    match value? {
        Bson::Int32(v) => u64::try_from(*v).ok(),
        Bson::Int64(v) => u64::try_from(*v).ok(),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}
