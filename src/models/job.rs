use std::cmp::Ordering;
use std::rc::Rc;

use crate::SchedulingError;

use super::{Task, TimeStep};

/// One periodic instance of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    task: Rc<Task>,              // Shared, never owned by the job
    instance: usize,             // 1-based index within its task
    arrival_time: TimeStep,
    remaining_time: TimeStep,
    absolute_deadline: TimeStep, // arrival_time + period
    completed: bool,
    missed_deadline: bool,       // Sticky once set
}

impl Job {
    pub fn new(task: Rc<Task>, instance: usize, arrival_time: TimeStep) -> Self {
        Self {
            remaining_time: task.cost(),
            absolute_deadline: arrival_time.saturating_add(task.period()),
            task,
            instance,
            arrival_time,
            completed: false,
            missed_deadline: false,
        }
    }

    pub fn task(&self) -> &Rc<Task> {
        &self.task
    }

    pub fn task_id(&self) -> &str {
        self.task.id()
    }

    pub fn instance(&self) -> usize {
        self.instance
    }

    pub fn arrival_time(&self) -> TimeStep {
        self.arrival_time
    }

    pub fn remaining_time(&self) -> TimeStep {
        self.remaining_time
    }

    pub fn absolute_deadline(&self) -> TimeStep {
        self.absolute_deadline
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn missed_deadline(&self) -> bool {
        self.missed_deadline
    }

    /// Whether all the work of this job has been executed, whether or not the
    /// completion has been handled yet.
    pub fn is_complete(&self) -> bool {
        self.completed || self.remaining_time == 0
    }

    /// Same job instance as `other`.
    pub fn same_instance(&self, other: &Job) -> bool {
        self.task_id() == other.task_id() && self.instance == other.instance
    }

    /// Runs the job for `n_steps` time units.
    pub fn schedule(&mut self, n_steps: TimeStep) -> Result<(), SchedulingError> {
        self.remaining_time = self.remaining_time.checked_sub(n_steps).ok_or_else(|| {
            SchedulingError::InvariantViolation(format!(
                "job {}#{} ran {} units with only {} remaining",
                self.task_id(),
                self.instance,
                n_steps,
                self.remaining_time
            ))
        })?;
        Ok(())
    }

    /// Marks the job as done at time `t`. Returns `true` if completing at `t`
    /// newly makes it a deadline miss.
    pub fn complete(&mut self, t: TimeStep) -> bool {
        self.completed = true;
        if t > self.absolute_deadline {
            return self.mark_missed();
        }
        false
    }

    /// Flags the job as having missed its deadline. Returns `true` only the
    /// first time.
    pub fn mark_missed(&mut self) -> bool {
        let newly = !self.missed_deadline;
        self.missed_deadline = true;
        newly
    }

    /// Dispatch order: task priority, then oldest arrival, then oldest instance.
    pub fn dispatch_order(&self, other: &Job) -> Ordering {
        self.task
            .priority_key()
            .cmp(&other.task.priority_key())
            .then(self.arrival_time.cmp(&other.arrival_time))
            .then(self.instance.cmp(&other.instance))
    }
}
