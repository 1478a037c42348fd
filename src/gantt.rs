//! Fixed-width textual Gantt chart of finished execution logs.

use crate::constants::{IDLE_MARKER, MISS_MARKER};
use crate::scheduler::SimulationReport;
use crate::{Interval, Processor, Slot, TimeStep};

const HEADER_LABEL: &str = "Tempo:";

/// Renders one row per processor over `[0, max_time)`, one cell of
/// `cell_width` characters per time unit. Ids that do not fit are
/// truncated, tick labels keep their last digits; a width of zero is
/// treated as one.
pub fn render(processors: &[Processor], max_time: TimeStep, cell_width: usize) -> String {
    let width = cell_width.max(1);
    let labels: Vec<String> = processors.iter().map(|p| format!("CPU {}:", p.id())).collect();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(HEADER_LABEL.len()))
        .max()
        .unwrap_or(HEADER_LABEL.len())
        + 1;

    let mut out = String::new();

    out.push_str(&pad(HEADER_LABEL, label_width));
    for t in 0..max_time {
        out.push_str(&tick_label(t, width));
    }
    out.push('\n');

    out.push_str(&"-".repeat(label_width + width * max_time));
    out.push('\n');

    for (processor, label) in processors.iter().zip(labels.iter()) {
        out.push_str(&pad(label, label_width));
        let mut log = processor.execution_log().iter().peekable();
        for t in 0..max_time {
            while log.peek().is_some_and(|interval| interval.end <= t) {
                log.next();
            }
            let covering = log.peek().filter(|interval| interval.start <= t);
            out.push_str(&cell(covering.copied(), width));
        }
        out.push('\n');
    }
    out
}

pub fn render_report(report: &SimulationReport, cell_width: usize) -> String {
    render(report.processors(), report.max_time(), cell_width)
}

fn cell(interval: Option<&Interval>, width: usize) -> String {
    let mut chars: Vec<char> = match interval.map(|i| &i.slot) {
        Some(Slot::Busy { task_id, .. }) => {
            let mut chars: Vec<char> = task_id.chars().take(width).collect();
            chars.resize(width, ' ');
            chars
        }
        Some(Slot::Idle) | None => vec![IDLE_MARKER; width],
    };
    if interval.is_some_and(|i| i.missed_deadline) {
        chars[width - 1] = MISS_MARKER;
    }
    chars.into_iter().collect()
}

/// Header cell of instant `t`. When the number is wider than the cell, its
/// least significant digits are kept so consecutive ticks stay distinct.
fn tick_label(t: TimeStep, width: usize) -> String {
    let digits = t.to_string();
    let skip = digits.len().saturating_sub(width);
    pad(&digits[skip..], width)
}

/// Left-aligns `text` in exactly `width` characters.
fn pad(text: &str, width: usize) -> String {
    let mut padded: String = text.chars().take(width).collect();
    let len = padded.chars().count();
    padded.extend(std::iter::repeat(' ').take(width - len));
    padded
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{Job, Task};

    fn processor(tasks: &[(&str, usize, usize)]) -> Processor {
        let mut processor = Processor::new(1);
        for &(id, cost, period) in tasks {
            processor.add(Rc::new(Task::new(id, cost, period).unwrap()));
        }
        processor
    }

    #[test]
    fn test_render_layout() {
        let mut cpu = processor(&[("T1", 1, 2)]);
        let t1 = cpu.task_set().get_tasks()[0].clone();
        cpu.release(Job::new(t1, 1, 0)).unwrap();
        cpu.dispatch(0).unwrap();
        cpu.advance(0, 1).unwrap();
        cpu.complete(1);
        cpu.advance(1, 2).unwrap();

        let chart = render(&[cpu], 2, 3);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Tempo: 0  1  ");
        assert_eq!(lines[1], "-".repeat(13));
        assert_eq!(lines[2], "CPU 1: T1 ___");
    }

    #[test]
    fn test_long_ids_are_truncated() {
        let mut cpu = processor(&[("Telemetry", 2, 4)]);
        let task = cpu.task_set().get_tasks()[0].clone();
        cpu.release(Job::new(task, 1, 0)).unwrap();
        cpu.dispatch(0).unwrap();
        cpu.advance(0, 2).unwrap();

        let chart = render(&[cpu], 2, 2);
        assert_eq!(chart.lines().nth(2), Some("CPU 1: TeTe"));
    }

    #[test]
    fn test_missed_cells_are_marked() {
        let mut cpu = processor(&[("S", 3, 4)]);
        let task = cpu.task_set().get_tasks()[0].clone();
        cpu.release(Job::new(task, 1, 0)).unwrap();
        cpu.dispatch(0).unwrap();
        cpu.advance(0, 2).unwrap();
        cpu.flag_overrun("S", 1);

        let chart = render(&[cpu], 2, 3);
        assert_eq!(chart.lines().nth(2), Some("CPU 1: S !S !"));
    }

    #[test]
    fn test_narrow_ticks_keep_last_digits() {
        let chart = render(&[processor(&[("T", 1, 2)])], 12, 1);
        assert_eq!(chart.lines().next(), Some("Tempo: 012345678901"));

        let chart = render(&[processor(&[("T", 1, 2)])], 102, 2);
        assert!(chart.lines().next().is_some_and(|header| header.ends_with("98990001")));
    }

    #[test]
    fn test_zero_width_degrades_to_one() {
        let cpu = processor(&[("T", 1, 2)]);
        let chart = render(&[cpu], 3, 0);
        assert_eq!(chart.lines().nth(2), Some("CPU 1: ___"));
    }
}
