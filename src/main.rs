use std::process;

use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use csv::{ReaderBuilder, Trim};

use multiprocessor::constants::{Policy, DEFAULT_CELL_WIDTH};
use multiprocessor::scheduler::SimulationReport;
use multiprocessor::{gantt, logger, simulate};
use multiprocessor::{SchedulingCode, SchedulingError, Task, TaskSet, TimeStep};

/// Reads a task set file (`id, cost, period` per line, no header, `#`
/// comments) and returns a `TaskSet`.
///
/// # Arguments
/// * `file_path` - Path to the task set file.
///
/// # Returns
/// * `Ok(TaskSet)` - Every task validated, ids unique.
/// * `Err(SchedulingError)` - The file is unreadable (`TaskFile`), a line is
///   malformed (`Parse`) or a task is invalid or infeasible.
pub fn read_task_file(file_path: &str) -> Result<TaskSet, SchedulingError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(file_path)?;
    let mut tasks = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        if record.len() != 3 {
            return Err(SchedulingError::Parse {
                line,
                reason: format!("expected `id, cost, period`, found {} field(s)", record.len()),
            });
        }

        let id = record[0].to_string();
        let cost: TimeStep = parse_field(&record[1], "cost", line)?;
        let period: TimeStep = parse_field(&record[2], "period", line)?;

        tasks.push(Task::new(id, cost, period)?);
    }

    TaskSet::new(tasks)
}

fn parse_field(value: &str, name: &str, line: usize) -> Result<TimeStep, SchedulingError> {
    value.parse().map_err(|_| SchedulingError::Parse {
        line,
        reason: format!("{} `{}` is not a non-negative integer", name, value),
    })
}

pub fn build_cli_command() -> Command {
    Command::new("rm-multiprocessor")
        .version("0.1.0")
        .about("Simulates partitioned Rate-Monotonic scheduling of periodic tasks")

        .arg(Arg::new("task_file")
            .required(true)
            .help("Path to the task set file (id, cost, period per line)"))

        .arg(Arg::new("policy")
            .short('p')
            .long("policy")
            .help("Task assignment: First-Fit RM partitioning or a single processor")
            .value_parser(["ff", "uni"])
            .default_value("ff"))

        .arg(Arg::new("horizon")
            .short('t')
            .long("horizon")
            .help("Simulated duration (defaults to the hyperperiod)")
            .value_parser(RangedU64ValueParser::<TimeStep>::new().range(1..)))

        .arg(Arg::new("cell_width")
            .short('w')
            .long("cell-width")
            .help("Width of one time unit in the Gantt chart")
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
            .default_value("4"))

        .arg(Arg::new("verbose")
            .long("verbose")
            .action(ArgAction::Count)
            .help("More logging (repeat for debug and trace)"))

        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .conflicts_with("verbose")
            .help("Only log errors"))
}

fn parse_policy(value: &str) -> Policy {
    match value {
        "uni" => Policy::Uniprocessor,
        _ => Policy::FirstFit,
    }
}

fn print_report(report: &SimulationReport, cell_width: usize) {
    println!("Partition:");
    for processor in report.processors() {
        let ids: Vec<&str> = processor.task_set().iter().map(|t| t.id()).collect();
        println!(
            "  CPU {}: {:?} (U={:.2}, bound={:.4})",
            processor.id(),
            ids,
            processor.utilisation(),
            processor.bound()
        );
    }
    println!("Hyperperiod: {}", report.max_time());
    println!();
    print!("{}", gantt::render_report(report, cell_width));
    println!();

    if report.is_schedulable() {
        println!("No deadline missed.");
        return;
    }
    println!("Deadline misses:");
    for miss in report.misses() {
        println!(
            "  CPU {}: {}#{} deadline {} (detected at {})",
            miss.processor, miss.task_id, miss.instance, miss.absolute_deadline, miss.detected_at
        );
    }
}

fn main() {
    // cargo run <task_file> [-p ff|uni] [-t <horizon>] [-w <cell width>] [--verbose] [-q]
    // example : cargo run tasks.csv -p ff -w 3
    let matches: ArgMatches = build_cli_command().get_matches();

    let quiet = matches.get_flag("quiet");
    let verbosity = matches.get_count("verbose");
    logger::init(logger::level_for(quiet, verbosity));

    let task_file = matches
        .get_one::<String>("task_file")
        .map(String::as_str)
        .unwrap_or_default();
    let policy = parse_policy(
        matches
            .get_one::<String>("policy")
            .map(String::as_str)
            .unwrap_or("ff"),
    );
    let horizon = matches.get_one::<TimeStep>("horizon").copied();
    let cell_width = matches
        .get_one::<usize>("cell_width")
        .copied()
        .unwrap_or(DEFAULT_CELL_WIDTH);

    let taskset = match read_task_file(task_file) {
        Ok(taskset) => taskset,
        Err(e) => {
            eprintln!("Error reading task file: {}", e);
            process::exit(SchedulingCode::InputError as i32);
        }
    };

    let report = match simulate(&taskset, policy, horizon) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation aborted: {}", e);
            process::exit(SchedulingCode::InputError as i32);
        }
    };

    print_report(&report, cell_width);
    process::exit(report.code() as i32);
}
