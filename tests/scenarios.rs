use multiprocessor::constants::Policy;
use multiprocessor::scheduler::{FirstFitScheduler, Scheduler, Simulation};
use multiprocessor::{gantt, simulate, SchedulingCode, SchedulingError, Task, TaskSet, TimeStep};

fn task_set(tasks: &[(&str, TimeStep, TimeStep)]) -> TaskSet {
    TaskSet::new(
        tasks
            .iter()
            .map(|&(id, cost, period)| Task::new(id, cost, period).unwrap())
            .collect(),
    )
    .unwrap()
}

#[test]
fn reference_scenario_partition_and_schedule() {
    let tasks = task_set(&[("T1", 1, 2), ("T2", 2, 5), ("T3", 2, 4)]);

    let partition = FirstFitScheduler.partition_tasks(&tasks);
    assert_eq!(partition.assignment(), vec![vec!["T1"], vec!["T3"], vec!["T2"]]);

    let report = Simulation::new(partition).unwrap().run().unwrap();
    assert_eq!(report.max_time(), 20);
    assert!(report.is_schedulable());

    // T1 runs one unit out of every two, from time 0.
    let cpu1 = report.processors()[0].execution_log();
    for (k, interval) in cpu1.iter().enumerate() {
        assert_eq!((interval.start, interval.end), (k, k + 1));
        assert_eq!(interval.is_idle(), k % 2 == 1);
    }

    // T3 two units every four, T2 two units every five.
    for (processor, period) in [(1, 4), (2, 5)] {
        let log = report.processors()[processor].execution_log();
        let busy: Vec<(TimeStep, TimeStep)> = log
            .iter()
            .filter(|i| !i.is_idle())
            .map(|i| (i.start, i.end))
            .collect();
        let expected: Vec<(TimeStep, TimeStep)> = (0..20 / period).map(|k| (k * period, k * period + 2)).collect();
        assert_eq!(busy, expected);
    }
}

#[test]
fn reference_scenario_chart() {
    let tasks = task_set(&[("T1", 1, 2), ("T2", 2, 5), ("T3", 2, 4)]);
    let report = simulate(&tasks, Policy::FirstFit, None).unwrap();
    let chart = gantt::render_report(&report, 3);
    let lines: Vec<&str> = chart.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Tempo: 0  1  2  "));
    assert!(lines[1].chars().all(|c| c == '-'));
    assert!(lines[2].starts_with("CPU 1: T1 ___T1 ___"));
    assert!(lines[3].starts_with("CPU 2: T3 T3 ______"));
    assert!(lines[4].starts_with("CPU 3: T2 T2 _________T2 "));
    assert!(!chart.contains('!'));
}

#[test]
fn overloaded_uniprocessor_misses() {
    // T2 never gets the processor: T1 and T3 use all of it.
    let tasks = task_set(&[("T1", 1, 2), ("T2", 2, 5), ("T3", 2, 4)]);
    let report = simulate(&tasks, Policy::Uniprocessor, None).unwrap();
    assert_eq!(report.code(), SchedulingCode::DeadlineMissed);
    assert!(report.misses().iter().all(|m| m.task_id == "T2"));
    assert_eq!(report.misses().len(), 4);
}

#[test]
fn overrunning_job_is_marked_in_chart() {
    let tasks = task_set(&[("H", 1, 2), ("L", 3, 4)]);
    let report = simulate(&tasks, Policy::Uniprocessor, None).unwrap();

    let chart = gantt::render_report(&report, 2);
    assert_eq!(chart.lines().nth(2), Some("CPU 1: H L!H L!"));
}

#[test]
fn infeasible_task_is_rejected_before_partitioning() {
    assert!(matches!(
        Task::new("T9", 4, 4),
        Err(SchedulingError::InfeasibleTask { .. })
    ));
}
