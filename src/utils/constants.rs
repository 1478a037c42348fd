/// Exit status of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingCode {
    Schedulable = 0,
    DeadlineMissed = 2,
    InputError = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// First-Fit Rate-Monotonic partitioning under the Liu & Layland bound.
    FirstFit,
    /// Every task on a single processor, no admission test.
    Uniprocessor,
}

pub const DEFAULT_CELL_WIDTH: usize = 4;

/// Cell filler for idle time in the Gantt chart.
pub const IDLE_MARKER: char = '_';

/// Overlaid on cells of intervals that belong to a job which missed its deadline.
pub const MISS_MARKER: char = '!';
