use log::info;

use crate::constants::Policy;
use crate::scheduler::{scheduler_for, Simulation, SimulationReport};
use crate::{SchedulingError, TaskSet, TimeStep};

/// Partitions `task_set` with `policy` and simulates it, over `horizon` when
/// given, otherwise over the hyperperiod of the whole task set.
///
/// # Arguments
/// * `task_set` - The tasks to assign, already validated.
/// * `policy` - First-Fit RM partitioning or everything on one processor.
/// * `horizon` - Simulated duration overriding the hyperperiod.
///
/// # Returns
/// * `Ok(SimulationReport)` - Logs, partition and deadline misses; misses are
///   a result, not an error.
/// * `Err(SchedulingError::HorizonOverflow)` - No `horizon` was given and the
///   hyperperiod does not fit in a `TimeStep`.
/// * `Err(SchedulingError::InvariantViolation)` - The engine reached an
///   inconsistent state.
pub fn simulate(
    task_set: &TaskSet,
    policy: Policy,
    horizon: Option<TimeStep>,
) -> Result<SimulationReport, SchedulingError> {
    let scheduler = scheduler_for(policy);
    let partition = scheduler.partition_tasks(task_set);
    info!(
        "{}: {} task(s) on {} processor(s)",
        scheduler.name(),
        task_set.len(),
        partition.processor_number()
    );

    let simulation = match horizon {
        Some(max_time) => Simulation::with_horizon(partition, max_time),
        None => Simulation::new(partition)?,
    };
    simulation.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchedulingCode, Task};

    fn reference() -> TaskSet {
        TaskSet::new(vec![
            Task::new("T1", 1, 2).unwrap(),
            Task::new("T2", 2, 5).unwrap(),
            Task::new("T3", 2, 4).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_fit_is_schedulable() {
        let report = simulate(&reference(), Policy::FirstFit, None).unwrap();
        assert_eq!(report.max_time(), 20);
        assert_eq!(report.code(), SchedulingCode::Schedulable);
    }

    #[test]
    fn test_uniprocessor_overload_misses() {
        let report = simulate(&reference(), Policy::Uniprocessor, None).unwrap();
        assert_eq!(report.code(), SchedulingCode::DeadlineMissed);
    }

    #[test]
    fn test_horizon_override() {
        let report = simulate(&reference(), Policy::FirstFit, Some(6)).unwrap();
        assert_eq!(report.max_time(), 6);
        for processor in report.processors() {
            let covered: usize = processor.execution_log().iter().map(|i| i.duration()).sum();
            assert_eq!(covered, 6);
        }
    }

    #[test]
    fn test_unrepresentable_hyperperiod() {
        let periods = [1_000_000_007, 998_244_353, 1_000_000_009];
        let tasks = TaskSet::new(
            periods
                .iter()
                .enumerate()
                .map(|(i, &period)| Task::new(format!("T{}", i + 1), 1, period).unwrap())
                .collect(),
        )
        .unwrap();

        assert!(matches!(
            simulate(&tasks, Policy::Uniprocessor, None),
            Err(SchedulingError::HorizonOverflow(_))
        ));

        // An explicit horizon sidesteps the hyperperiod.
        let report = simulate(&tasks, Policy::Uniprocessor, Some(10)).unwrap();
        assert!(report.is_schedulable());
        assert_eq!(report.processors()[0].busy_time(), 3);
    }

    #[test]
    fn test_empty_task_set() {
        let report = simulate(&TaskSet::new_empty(), Policy::FirstFit, None).unwrap();
        assert_eq!(report.max_time(), 0);
        assert!(report.is_schedulable());
    }
}
