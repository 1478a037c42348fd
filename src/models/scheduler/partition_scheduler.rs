use log::{debug, info};

use crate::scheduler::Scheduler;
use crate::{Partition, TaskSet};

/// First-Fit Rate-Monotonic partitioning.
///
/// Tasks are taken in priority order (shorter period first, then id) and
/// each goes to the first processor that still passes the Liu & Layland
/// test with it added. When none does, a new processor is opened for it.
/// Partitioning never fails: a single task always fits on its own since
/// `cost < period`.
pub struct FirstFitScheduler;

impl Scheduler for FirstFitScheduler {
    fn name(&self) -> &'static str {
        "First-Fit RM"
    }

    fn partition_tasks(&self, task_set: &TaskSet) -> Partition {
        let mut partition = Partition::new();

        for task in task_set.sorted_by_priority() {
            let admitting = partition.iter().position(|p| p.admits(&task));
            match admitting {
                Some(index) => {
                    debug!("{} admitted on CPU {}", task.id(), partition[index].id());
                    partition[index].add(task);
                }
                None => {
                    let processor = partition.open_processor();
                    debug!("{} opens CPU {}", task.id(), processor.id());
                    processor.add(task);
                }
            }
        }

        for processor in partition.iter() {
            info!(
                "CPU {}: {:?} U={:.4} bound={:.4}",
                processor.id(),
                processor.task_set().iter().map(|t| t.id()).collect::<Vec<_>>(),
                processor.utilisation(),
                processor.bound()
            );
        }
        partition
    }
}
