use thiserror::Error;

use crate::models::TimeStep;

#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("task {id} is infeasible: cost {cost} >= period {period}")]
    InfeasibleTask {
        id: String,
        cost: TimeStep,
        period: TimeStep,
    },

    #[error("task {id} is invalid: {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("task {0} is defined twice")]
    DuplicateTask(String),

    #[error("hyperperiod of periods {0:?} does not fit in a time step")]
    HorizonOverflow(Vec<TimeStep>),

    #[error("scheduling invariant violated: {0}")]
    InvariantViolation(String),

    #[error("cannot read task file: {0}")]
    TaskFile(#[from] csv::Error),

    #[error("task file line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
