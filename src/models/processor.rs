use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::{liu_layland_bound, SchedulingError};

use super::{Job, ReadyQueue, Task, TaskSet, TimeStep, ID};

/// What a processor was doing during an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Idle,
    Busy { task_id: String, instance: usize },
}

impl Slot {
    fn of(job: &Job) -> Self {
        Slot::Busy {
            task_id: job.task_id().to_string(),
            instance: job.instance(),
        }
    }

    pub fn task_id(&self) -> Option<&str> {
        match self {
            Slot::Idle => None,
            Slot::Busy { task_id, .. } => Some(task_id),
        }
    }
}

/// Half-open execution interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: TimeStep,
    pub end: TimeStep,
    pub slot: Slot,
    pub missed_deadline: bool,
}

impl Interval {
    pub fn duration(&self) -> TimeStep {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.slot == Slot::Idle
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Idle => write!(f, "[{}, {}) idle", self.start, self.end)?,
            Slot::Busy { task_id, instance } => {
                write!(f, "[{}, {}) {}#{}", self.start, self.end, task_id, instance)?
            }
        }
        if self.missed_deadline {
            write!(f, " !")?;
        }
        Ok(())
    }
}

/// A processing unit: its assigned tasks, the running job, the jobs waiting
/// for it and everything it did so far.
#[derive(Debug)]
pub struct Processor {
    id: ID,
    task_set: TaskSet,          // Fixed once partitioning is done
    active_job: Option<Job>,    // At most one running job
    ready_queue: ReadyQueue,    // Never holds the active job
    execution_log: Vec<Interval>,
}

impl Processor {
    pub fn new(id: ID) -> Self {
        Self {
            id,
            task_set: TaskSet::new_empty(),
            active_job: None,
            ready_queue: ReadyQueue::new(),
            execution_log: Vec::new(),
        }
    }

    pub fn id(&self) -> ID {
        self.id
    }

    pub fn task_set(&self) -> &TaskSet {
        &self.task_set
    }

    pub fn active_job(&self) -> Option<&Job> {
        self.active_job.as_ref()
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready_queue
    }

    pub fn execution_log(&self) -> &[Interval] {
        &self.execution_log
    }

    pub fn utilisation(&self) -> f64 {
        self.task_set.utilisation()
    }

    /// Liu & Layland bound for the number of tasks currently assigned.
    pub fn bound(&self) -> f64 {
        liu_layland_bound(self.task_set.len())
    }

    /// Whether the assigned tasks plus `task` stay under the Liu & Layland
    /// bound for `n + 1` tasks.
    pub fn admits(&self, task: &Task) -> bool {
        let n = self.task_set.len() + 1;
        self.utilisation() + task.utilisation() <= liu_layland_bound(n)
    }

    /// Assigns a task. Only valid before the simulation starts.
    pub fn add(&mut self, task: Rc<Task>) {
        self.task_set.add_task(task);
    }

    /// Time at which the active job would finish if left alone.
    pub fn next_completion(&self, now: TimeStep) -> Option<TimeStep> {
        self.active_job.as_ref().map(|job| now.saturating_add(job.remaining_time()))
    }

    /// Enqueues a freshly released job.
    pub fn release(&mut self, job: Job) -> Result<(), SchedulingError> {
        if !self.task_set.task_exists(job.task_id()) {
            return Err(SchedulingError::InvariantViolation(format!(
                "job {}#{} released on CPU {} which does not own its task",
                job.task_id(),
                job.instance(),
                self.id
            )));
        }
        self.ready_queue.push(job);
        Ok(())
    }

    /// Flags the given instance as overrunning if it is still held here and
    /// unfinished. Returns its absolute deadline when it is newly flagged.
    pub fn flag_overrun(&mut self, task_id: &str, instance: usize) -> Option<TimeStep> {
        let job = match self.active_job.as_mut() {
            Some(job) if job.task_id() == task_id && job.instance() == instance => Some(job),
            _ => self.ready_queue.find_mut(task_id, instance),
        }?;

        if job.is_complete() || !job.mark_missed() {
            return None;
        }
        let deadline = job.absolute_deadline();
        self.flag_logged(task_id, instance);
        Some(deadline)
    }

    /// Runs the active job (or idles) over `[from, to)` and logs the interval.
    pub fn advance(&mut self, from: TimeStep, to: TimeStep) -> Result<(), SchedulingError> {
        let (slot, missed) = match self.active_job.as_mut() {
            Some(job) => {
                job.schedule(to - from)?;
                (Slot::of(job), job.missed_deadline())
            }
            None => (Slot::Idle, false),
        };
        self.append(Interval {
            start: from,
            end: to,
            slot,
            missed_deadline: missed,
        })
    }

    /// Retires the active job if it has no work left. Returns the finished
    /// job and whether finishing at `now` newly made it miss its deadline.
    pub fn complete(&mut self, now: TimeStep) -> Option<(Job, bool)> {
        if !self.active_job.as_ref().is_some_and(|job| job.remaining_time() == 0) {
            return None;
        }
        let mut job = self.active_job.take()?;
        let newly_missed = job.complete(now);
        if newly_missed {
            self.flag_logged(job.task_id(), job.instance());
        }
        debug!("t={} CPU {}: {}#{} completed", now, self.id, job.task_id(), job.instance());
        Some((job, newly_missed))
    }

    /// Preempts the active job if the head of the ready queue has strictly
    /// higher priority, then fills an empty processor from the queue.
    pub fn dispatch(&mut self, now: TimeStep) -> Result<(), SchedulingError> {
        let preempt = match (self.active_job.as_ref(), self.ready_queue.peek()) {
            (Some(active), Some(head)) => head.task().has_higher_priority_than(active.task()),
            _ => false,
        };
        if preempt {
            if let Some(job) = self.active_job.take() {
                debug!(
                    "t={} CPU {}: {}#{} preempted with {} left",
                    now,
                    self.id,
                    job.task_id(),
                    job.instance(),
                    job.remaining_time()
                );
                self.ready_queue.push(job);
            }
        }

        if self.active_job.is_none() {
            if let Some(job) = self.ready_queue.pop() {
                debug!("t={} CPU {}: dispatch {}#{}", now, self.id, job.task_id(), job.instance());
                self.active_job = Some(job);
            }
        }

        if let Some(active) = self.active_job.as_ref() {
            if self.ready_queue.contains(active) {
                return Err(SchedulingError::InvariantViolation(format!(
                    "CPU {}: active job {}#{} is also queued",
                    self.id,
                    active.task_id(),
                    active.instance()
                )));
            }
        }
        Ok(())
    }

    /// Flags every unfinished job whose deadline is at or before `horizon`.
    /// Returns `(task_id, instance, absolute_deadline)` for each newly
    /// flagged job.
    pub fn sweep_overdue(&mut self, horizon: TimeStep) -> Vec<(String, usize, TimeStep)> {
        let overdue: Vec<(String, usize)> = self
            .active_job
            .iter()
            .chain(self.ready_queue.iter())
            .filter(|job| !job.is_complete() && !job.missed_deadline())
            .filter(|job| job.absolute_deadline() <= horizon)
            .map(|job| (job.task_id().to_string(), job.instance()))
            .collect();

        overdue
            .into_iter()
            .filter_map(|(task_id, instance)| {
                self.flag_overrun(&task_id, instance)
                    .map(|deadline| (task_id, instance, deadline))
            })
            .collect()
    }

    /// Sum of busy interval lengths.
    pub fn busy_time(&self) -> TimeStep {
        self.execution_log
            .iter()
            .filter(|interval| !interval.is_idle())
            .map(Interval::duration)
            .sum()
    }

    fn append(&mut self, interval: Interval) -> Result<(), SchedulingError> {
        let expected = self.execution_log.last().map_or(0, |last| last.end);
        if interval.start != expected || interval.end <= interval.start {
            return Err(SchedulingError::InvariantViolation(format!(
                "CPU {}: interval [{}, {}) does not continue the log at {}",
                self.id, interval.start, interval.end, expected
            )));
        }

        if let Some(last) = self.execution_log.last_mut() {
            if last.slot == interval.slot && last.missed_deadline == interval.missed_deadline {
                last.end = interval.end;
                return Ok(());
            }
        }
        self.execution_log.push(interval);
        Ok(())
    }

    fn flag_logged(&mut self, task_id: &str, instance: usize) {
        for interval in self.execution_log.iter_mut() {
            if let Slot::Busy { task_id: id, instance: i } = &interval.slot {
                if id == task_id && *i == instance {
                    interval.missed_deadline = true;
                }
            }
        }
    }
}
