//! The seam between the runner and the store.

use std::future::Future;

use super::operation::{Operation, StepOutcome};
use crate::query::{execution_stats, ExplainSummary};
use crate::store::{BookStore, StoreResult};

/// Something that can carry out one [`Operation`] and materialize its result.
pub trait OperationExecutor {
    fn execute(&self, operation: &Operation) -> impl Future<Output = StoreResult<StepOutcome>>;
}

impl OperationExecutor for BookStore {
    async fn execute(&self, operation: &Operation) -> StoreResult<StepOutcome> {
        match operation {
            Operation::Find(spec) => self.find(spec).await.map(StepOutcome::Documents),
            Operation::UpdateOne { filter, update } => {
                let result = self.update_one(filter, update.clone()).await?;
                Ok(StepOutcome::Updated {
                    matched: result.matched_count,
                    modified: result.modified_count,
                })
            }
            Operation::DeleteOne { filter } => {
                let result = self.delete_one(filter).await?;
                Ok(StepOutcome::Deleted {
                    deleted: result.deleted_count,
                })
            }
            Operation::Aggregate(pipeline) => {
                self.aggregate(pipeline).await.map(StepOutcome::Documents)
            }
            Operation::CreateIndex(spec) => self
                .create_index(spec)
                .await
                .map(|name| StepOutcome::IndexCreated { name }),
            Operation::Explain(spec) => {
                let explain = self.explain(spec).await?;
                Ok(StepOutcome::Plan {
                    summary: ExplainSummary::from_explain(&explain),
                    execution_stats: execution_stats(&explain).cloned(),
                })
            }
        }
    }
}
