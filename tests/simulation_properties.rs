use std::collections::HashMap;

use proptest::prelude::*;

use multiprocessor::constants::Policy;
use multiprocessor::scheduler::{FirstFitScheduler, Scheduler};
use multiprocessor::{simulate, Slot, Task, TaskSet, TimeStep};

const PERIODS: [TimeStep; 8] = [2, 3, 4, 5, 6, 8, 10, 12];

fn task_set_strategy() -> impl Strategy<Value = TaskSet> {
    prop::collection::vec((prop::sample::select(PERIODS.to_vec()), 1usize..12), 1..7).prop_map(
        |entries| {
            let tasks = entries
                .into_iter()
                .enumerate()
                .map(|(i, (period, cost))| {
                    let cost = 1 + (cost - 1) % (period - 1);
                    Task::new(format!("T{}", i), cost, period).unwrap()
                })
                .collect();
            TaskSet::new(tasks).unwrap()
        },
    )
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop_oneof![Just(Policy::FirstFit), Just(Policy::Uniprocessor)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_logs_cover_horizon_without_gaps(tasks in task_set_strategy(), policy in policy_strategy()) {
        let report = simulate(&tasks, policy, None).unwrap();
        prop_assert_eq!(report.max_time(), tasks.hyperperiod().unwrap());

        for processor in report.processors() {
            let mut expected_start = 0;
            for interval in processor.execution_log() {
                prop_assert_eq!(interval.start, expected_start);
                prop_assert!(interval.end > interval.start);
                expected_start = interval.end;
            }
            prop_assert_eq!(expected_start, report.max_time());
        }
    }

    #[test]
    fn prop_partition_respects_liu_layland(tasks in task_set_strategy()) {
        let partition = FirstFitScheduler.partition_tasks(&tasks);
        let assigned: usize = partition.iter().map(|p| p.task_set().len()).sum();
        prop_assert_eq!(assigned, tasks.len());

        for processor in partition.iter() {
            prop_assert!(processor.utilisation() <= processor.bound());
        }
    }

    #[test]
    fn prop_admitted_partition_never_misses(tasks in task_set_strategy()) {
        let report = simulate(&tasks, Policy::FirstFit, None).unwrap();
        prop_assert!(report.is_schedulable(), "misses: {:?}", report.misses());
    }

    #[test]
    fn prop_runs_are_deterministic(tasks in task_set_strategy(), policy in policy_strategy()) {
        let first = simulate(&tasks, policy, None).unwrap();
        let second = simulate(&tasks, policy, None).unwrap();

        prop_assert_eq!(first.misses(), second.misses());
        for (a, b) in first.processors().iter().zip(second.processors()) {
            prop_assert_eq!(a.execution_log(), b.execution_log());
        }
    }

    #[test]
    fn prop_jobs_never_run_more_than_their_cost(tasks in task_set_strategy(), policy in policy_strategy()) {
        let report = simulate(&tasks, policy, None).unwrap();

        for processor in report.processors() {
            let mut executed: HashMap<(String, usize), TimeStep> = HashMap::new();
            for interval in processor.execution_log() {
                if let Slot::Busy { task_id, instance } = &interval.slot {
                    *executed.entry((task_id.clone(), *instance)).or_default() += interval.duration();
                }
            }
            for ((task_id, _), time) in executed {
                let cost = processor.task_set().get_task_by_id(&task_id).unwrap().cost();
                prop_assert!(time <= cost);
            }
        }
    }
}
