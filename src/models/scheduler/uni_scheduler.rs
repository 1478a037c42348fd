use crate::scheduler::Scheduler;
use crate::{Partition, TaskSet};

/// Puts the whole task set on one processor without any admission test.
/// Overloaded sets show their deadline misses in the simulation.
pub struct UniprocessorScheduler;

impl Scheduler for UniprocessorScheduler {
    fn name(&self) -> &'static str {
        "Uniprocessor RM"
    }

    fn partition_tasks(&self, task_set: &TaskSet) -> Partition {
        let mut partition = Partition::new();
        if task_set.is_empty() {
            return partition;
        }

        let processor = partition.open_processor();
        for task in task_set.sorted_by_priority() {
            processor.add(task);
        }
        partition
    }
}
