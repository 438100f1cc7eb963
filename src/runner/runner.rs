//! Sequential execution of a plan.

use std::io::Write;

use super::errors::{RunError, RunResult};
use super::executor::OperationExecutor;
use super::plan::Step;
use super::report::Reporter;
use crate::observability::ObservationScope;

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps_completed: usize,
}

/// Runs steps one at a time and reports each outcome.
///
/// Each step starts only after the previous one finished and was reported.
/// The first failure stops the run.
pub struct QueryRunner<'a, E, W: Write> {
    executor: &'a E,
    reporter: Reporter<W>,
}

impl<'a, E: OperationExecutor, W: Write> QueryRunner<'a, E, W> {
    pub fn new(executor: &'a E, reporter: Reporter<W>) -> Self {
        Self { executor, reporter }
    }

    pub async fn run(&mut self, steps: &[Step]) -> RunResult<RunSummary> {
        for (index, step) in steps.iter().enumerate() {
            let number = index + 1;
            let number_str = number.to_string();
            let stages = step.operation.stages();
            let mut fields = vec![
                ("label", step.label),
                ("operation", step.operation.kind()),
                ("step", number_str.as_str()),
            ];
            if let Some(stages) = &stages {
                fields.push(("stages", stages.as_str()));
            }
            let scope = ObservationScope::with_fields("STEP", &fields);

            let outcome = match self.executor.execute(&step.operation).await {
                Ok(outcome) => outcome,
                Err(source) => {
                    scope.fail(&source.to_string());
                    return Err(RunError::Step {
                        step: number,
                        label: step.label.to_string(),
                        source,
                    });
                }
            };

            if let Err(e) = self.reporter.report(number, step.label, &outcome) {
                scope.fail(&e.to_string());
                return Err(RunError::Report(e));
            }

            let count = outcome.count().to_string();
            scope.complete_with_fields(&[("count", count.as_str())]);
        }

        Ok(RunSummary {
            steps_completed: steps.len(),
        })
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::operation::{Operation, StepOutcome};
    use crate::runner::plan::demo_plan;
    use crate::runner::report::ReportFormat;
    use crate::store::{StoreError, StoreResult};
    use mongodb::bson::doc;
    use std::cell::RefCell;
    use std::io;

    /// Answers every operation with a canned outcome and records the calls.
    struct ScriptedExecutor {
        fail_at: Option<usize>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl ScriptedExecutor {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                fail_at,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl OperationExecutor for ScriptedExecutor {
        async fn execute(&self, operation: &Operation) -> StoreResult<StepOutcome> {
            let call = self.calls.borrow().len() + 1;
            self.calls.borrow_mut().push(operation.kind());

            if self.fail_at == Some(call) {
                let cause = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset");
                return Err(StoreError::operation(operation.kind())(cause.into()));
            }

            Ok(match operation {
                Operation::UpdateOne { .. } => StepOutcome::Updated {
                    matched: 1,
                    modified: 1,
                },
                Operation::DeleteOne { .. } => StepOutcome::Deleted { deleted: 1 },
                Operation::CreateIndex(spec) => StepOutcome::IndexCreated {
                    name: spec.default_name(),
                },
                _ => StepOutcome::Documents(vec![doc! { "call": call as i64 }]),
            })
        }
    }

    fn report_lines(runner: QueryRunner<'_, ScriptedExecutor, Vec<u8>>) -> Vec<String> {
        let out = runner.into_reporter().into_inner();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn test_runs_every_step_in_order() {
        let plan = demo_plan();
        let executor = ScriptedExecutor::new(None);
        let mut runner = QueryRunner::new(&executor, Reporter::new(Vec::new(), ReportFormat::Text));

        let summary = runner.run(&plan).await.unwrap();

        assert_eq!(summary.steps_completed, plan.len());
        let expected: Vec<_> = plan.iter().map(|s| s.operation.kind()).collect();
        assert_eq!(*executor.calls.borrow(), expected);

        let lines = report_lines(runner);
        assert_eq!(lines.len(), plan.len());
        for (line, step) in lines.iter().zip(&plan) {
            assert!(line.starts_with(&format!("{}: ", step.label)));
        }
    }

    #[tokio::test]
    async fn test_first_failure_aborts_remaining_steps() {
        let plan = demo_plan();
        let executor = ScriptedExecutor::new(Some(4));
        let mut runner = QueryRunner::new(&executor, Reporter::new(Vec::new(), ReportFormat::Text));

        let err = runner.run(&plan).await.unwrap_err();

        assert_eq!(err.step(), Some(4));
        assert_eq!(err.code(), "BOOKSTORE_OPERATION_FAILED");
        assert!(err.to_string().contains("Updated price result"));
        assert_eq!(executor.calls.borrow().len(), 4);

        // Only the three steps before the failure were reported
        assert_eq!(report_lines(runner).len(), 3);
    }

    #[tokio::test]
    async fn test_empty_plan() {
        let executor = ScriptedExecutor::new(Some(1));
        let mut runner = QueryRunner::new(&executor, Reporter::new(Vec::new(), ReportFormat::Json));

        let summary = runner.run(&[]).await.unwrap();

        assert_eq!(summary.steps_completed, 0);
        assert!(executor.calls.borrow().is_empty());
    }
}
