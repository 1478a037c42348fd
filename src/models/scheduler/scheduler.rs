use crate::constants::Policy;
use crate::{Partition, TaskSet};

use super::{FirstFitScheduler, UniprocessorScheduler};

/// Static assignment of a task set to processors, done once before the
/// simulation starts.
pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Assigns every task of `task_set` to exactly one processor.
    fn partition_tasks(&self, task_set: &TaskSet) -> Partition;
}

pub fn scheduler_for(policy: Policy) -> Box<dyn Scheduler> {
    match policy {
        Policy::FirstFit => Box::new(FirstFitScheduler),
        Policy::Uniprocessor => Box::new(UniprocessorScheduler),
    }
}
