use crate::SchedulingError;

use super::TimeStep;

/// Static description of a periodic task with an implicit deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    id: String,
    cost: TimeStep,   // C_i : Execution cost.
    period: TimeStep, // T_i : Period, also the relative deadline.
}

impl Task {
    /// Builds a task, rejecting any task that could not meet its own deadline
    /// even when running alone (`cost >= period`).
    pub fn new(id: impl Into<String>, cost: TimeStep, period: TimeStep) -> Result<Self, SchedulingError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(SchedulingError::InvalidTask {
                id,
                reason: "empty id".to_string(),
            });
        }
        if cost == 0 || period == 0 {
            return Err(SchedulingError::InvalidTask {
                id,
                reason: format!("cost ({}) and period ({}) must be positive", cost, period),
            });
        }
        if cost >= period {
            return Err(SchedulingError::InfeasibleTask { id, cost, period });
        }

        Ok(Self { id, cost, period })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cost(&self) -> TimeStep {
        self.cost
    }

    pub fn period(&self) -> TimeStep {
        self.period
    }

    pub fn utilisation(&self) -> f64 {
        self.cost as f64 / self.period as f64
    }

    /// Rate-Monotonic priority: lower key is higher priority, equal periods
    /// fall back on the id.
    pub fn priority_key(&self) -> (TimeStep, &str) {
        (self.period, &self.id)
    }

    /// Strict priority comparison on [`Task::priority_key`].
    pub fn has_higher_priority_than(&self, other: &Task) -> bool {
        self.priority_key() < other.priority_key()
    }
}
