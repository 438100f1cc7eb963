//! Query runner
//!
//! # Execution flow (strict order)
//!
//! 1. Open the store and check it answers
//! 2. For each step of the plan: execute, materialize, report
//! 3. Stop at the first failure
//! 4. Close the store, on every path

mod errors;
mod executor;
mod operation;
mod plan;
mod report;
#[allow(clippy::module_inception)]
mod runner;
mod session;

pub use errors::{RunError, RunResult};
pub use executor::OperationExecutor;
pub use operation::{Operation, StepOutcome};
pub use plan::{demo_plan, Step, PAGE_SIZE};
pub use report::{ReportFormat, Reporter};
pub use runner::{QueryRunner, RunSummary};
pub use session::{run_demo, seed, with_store};
