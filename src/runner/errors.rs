//! Terminal run errors

use std::io;

use thiserror::Error;

use crate::store::{StoreError, OPERATION_FAILED};

/// Result type for a run
pub type RunResult<T> = Result<T, RunError>;

/// The one failure that ends a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The store could not be opened or reached
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A step failed; later steps were not attempted
    #[error("Step {step} ({label}) failed: {source}")]
    Step {
        step: usize,
        label: String,
        #[source]
        source: StoreError,
    },

    /// The report could not be written
    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}

impl RunError {
    /// Error code string; every failure is an operation failure
    pub fn code(&self) -> &'static str {
        OPERATION_FAILED
    }

    /// 1-based number of the failed step, if a step failed
    pub fn step(&self) -> Option<usize> {
        match self {
            RunError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}
