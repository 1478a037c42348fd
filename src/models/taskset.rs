use std::collections::HashSet;
use std::rc::Rc;

use crate::{multiple_lcm, SchedulingError};

use super::{Task, TimeStep};

/// An ordered collection of tasks shared by reference with every job and
/// processor that needs them.
#[derive(Clone, Debug, Default)]
pub struct TaskSet {
    tasks: Vec<Rc<Task>>,
}

impl TaskSet {
    /// Builds a task set, rejecting duplicated ids.
    pub fn new(tasks: Vec<Task>) -> Result<Self, SchedulingError> {
        let mut seen = HashSet::new();
        for task in tasks.iter() {
            if !seen.insert(task.id()) {
                return Err(SchedulingError::DuplicateTask(task.id().to_string()));
            }
        }

        Ok(Self {
            tasks: tasks.into_iter().map(Rc::new).collect(),
        })
    }

    pub fn new_empty() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task(&mut self, task: Rc<Task>) {
        self.tasks.push(task);
    }

    pub fn get_tasks(&self) -> &Vec<Rc<Task>> {
        &self.tasks
    }

    pub fn get_task_by_id(&self, id: &str) -> Option<&Rc<Task>> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn task_exists(&self, id: &str) -> bool {
        self.get_task_by_id(id).is_some()
    }

    pub fn utilisation(&self) -> f64 {
        self.tasks.iter().map(|t| t.utilisation()).sum()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<Task>> {
        self.tasks.iter()
    }

    /// Tasks in Rate-Monotonic order. `sort_by` is stable and the key is
    /// total, so the result is reproducible.
    pub fn sorted_by_priority(&self) -> Vec<Rc<Task>> {
        let mut sorted = self.tasks.clone();
        sorted.sort_by(|a, b| a.priority_key().cmp(&b.priority_key()));
        sorted
    }

    /// Least common multiple of all periods, `0` for an empty set.
    pub fn hyperperiod(&self) -> Result<TimeStep, SchedulingError> {
        if self.tasks.is_empty() {
            return Ok(0);
        }
        let periods: Vec<TimeStep> = self.tasks.iter().map(|t| t.period()).collect();
        multiple_lcm(&periods)
    }
}
