//! Event-driven simulation of partitioned Rate-Monotonic scheduling.
//!
//! A single clock drives every processor. Instead of ticking, the clock
//! jumps to the next event (an arrival on any processor or a completion of
//! any running job), runs every processor over the elapsed span and then
//! resolves the events at the new instant in a fixed order: arrivals,
//! completions, dispatch.

use std::rc::Rc;

use log::{debug, info, warn};

use crate::{Job, Partition, Processor, SchedulingCode, SchedulingError, Task, TimeStep, ID};

/// A job that did not finish by its absolute deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineMiss {
    pub task_id: String,
    pub instance: usize,
    pub processor: ID,
    pub absolute_deadline: TimeStep,
    pub detected_at: TimeStep,
}

/// Release bookkeeping of one task.
#[derive(Debug)]
struct ArrivalPointer {
    task: Rc<Task>,
    processor: usize,                // Index in `Simulation::processors`
    next_arrival: Option<TimeStep>,  // None once past the horizon
    released: usize,                 // Last instance released
}

#[derive(Debug)]
pub struct Simulation {
    processors: Vec<Processor>,
    arrivals: Vec<ArrivalPointer>,
    current_time: TimeStep,
    max_time: TimeStep,
    misses: Vec<DeadlineMiss>,
}

impl Simulation {
    /// Prepares a simulation over the hyperperiod of every task of every
    /// processor, so that all execution logs share the same timeline.
    ///
    /// # Arguments
    /// * `partition` - The processors and their assigned tasks, as produced by
    ///   a [`Scheduler`](crate::scheduler::Scheduler).
    ///
    /// # Returns
    /// * `Ok(Simulation)` - Ready to [`run`](Simulation::run), horizon `0` when
    ///   no task is assigned.
    /// * `Err(SchedulingError::HorizonOverflow)` - The hyperperiod does not fit
    ///   in a `TimeStep`.
    pub fn new(partition: Partition) -> Result<Self, SchedulingError> {
        let periods: Vec<TimeStep> = partition
            .iter()
            .flat_map(|p| p.task_set().iter().map(|t| t.period()))
            .collect();
        let max_time = if periods.is_empty() {
            0
        } else {
            crate::multiple_lcm(&periods)?
        };
        Ok(Self::with_horizon(partition, max_time))
    }

    pub fn with_horizon(partition: Partition, max_time: TimeStep) -> Self {
        let processors = partition.into_processors();
        let mut arrivals = Vec::new();
        for (index, processor) in processors.iter().enumerate() {
            for task in processor.task_set().sorted_by_priority() {
                arrivals.push(ArrivalPointer {
                    task,
                    processor: index,
                    next_arrival: Some(0),
                    released: 0,
                });
            }
        }

        Self {
            processors,
            arrivals,
            current_time: 0,
            max_time,
            misses: Vec::new(),
        }
    }

    pub fn max_time(&self) -> TimeStep {
        self.max_time
    }

    /// Runs until the horizon and hands over the final state.
    pub fn run(mut self) -> Result<SimulationReport, SchedulingError> {
        info!(
            "simulating {} task(s) on {} processor(s) over [0, {})",
            self.arrivals.len(),
            self.processors.len(),
            self.max_time
        );

        self.release_arrivals()?;
        self.dispatch()?;

        while self.current_time < self.max_time {
            self.step()?;
        }
        self.sweep_overdue();

        for processor in self.processors.iter() {
            let covered = processor.execution_log().last().map_or(0, |last| last.end);
            if covered != self.max_time {
                return Err(SchedulingError::InvariantViolation(format!(
                    "CPU {} log covers [0, {}) instead of [0, {})",
                    processor.id(),
                    covered,
                    self.max_time
                )));
            }
        }

        info!(
            "simulation done at t={}: {} deadline miss(es)",
            self.current_time,
            self.misses.len()
        );

        Ok(SimulationReport {
            processors: self.processors,
            max_time: self.max_time,
            misses: self.misses,
        })
    }

    /// Jumps to the next event, runs every processor up to it and resolves
    /// what happens at that instant.
    fn step(&mut self) -> Result<(), SchedulingError> {
        let now = self.current_time;
        let next_event = self.next_event_time();
        if next_event <= now {
            return Err(SchedulingError::InvariantViolation(format!(
                "clock would not advance past t={}",
                now
            )));
        }

        for processor in self.processors.iter_mut() {
            processor.advance(now, next_event)?;
        }
        self.current_time = next_event;

        self.release_arrivals()?;
        self.complete_jobs();
        self.dispatch()
    }

    /// Earliest pending arrival or completion, clamped to the horizon.
    fn next_event_time(&self) -> TimeStep {
        let next_arrival = self.arrivals.iter().filter_map(|a| a.next_arrival).min();
        let next_completion = self
            .processors
            .iter()
            .filter_map(|p| p.next_completion(self.current_time))
            .min();

        [next_arrival, next_completion]
            .into_iter()
            .flatten()
            .min()
            .map_or(self.max_time, |t| t.min(self.max_time))
    }

    /// Releases every job due now. The previous instance of a task that is
    /// still unfinished when the next one arrives is an overrun.
    fn release_arrivals(&mut self) -> Result<(), SchedulingError> {
        let now = self.current_time;

        for pointer in self.arrivals.iter_mut() {
            if pointer.next_arrival != Some(now) {
                continue;
            }
            let processor = &mut self.processors[pointer.processor];

            if pointer.released > 0 {
                if let Some(deadline) = processor.flag_overrun(pointer.task.id(), pointer.released) {
                    let miss = DeadlineMiss {
                        task_id: pointer.task.id().to_string(),
                        instance: pointer.released,
                        processor: processor.id(),
                        absolute_deadline: deadline,
                        detected_at: now,
                    };
                    warn!(
                        "t={} CPU {}: {}#{} overran its deadline {}",
                        now, miss.processor, miss.task_id, miss.instance, deadline
                    );
                    self.misses.push(miss);
                }
            }

            pointer.released += 1;
            debug!("t={} CPU {}: {}#{} arrives", now, processor.id(), pointer.task.id(), pointer.released);
            processor.release(Job::new(pointer.task.clone(), pointer.released, now))?;

            // An arrival past the representable range is past the horizon too.
            pointer.next_arrival = now
                .checked_add(pointer.task.period())
                .filter(|&next| next <= self.max_time);
        }
        Ok(())
    }

    fn complete_jobs(&mut self) {
        let now = self.current_time;

        for processor in self.processors.iter_mut() {
            if let Some((job, true)) = processor.complete(now) {
                warn!(
                    "t={} CPU {}: {}#{} completed after its deadline {}",
                    now,
                    processor.id(),
                    job.task_id(),
                    job.instance(),
                    job.absolute_deadline()
                );
                self.misses.push(DeadlineMiss {
                    task_id: job.task_id().to_string(),
                    instance: job.instance(),
                    processor: processor.id(),
                    absolute_deadline: job.absolute_deadline(),
                    detected_at: now,
                });
            }
        }
    }

    fn dispatch(&mut self) -> Result<(), SchedulingError> {
        let now = self.current_time;
        for processor in self.processors.iter_mut() {
            processor.dispatch(now)?;
        }
        Ok(())
    }

    /// Jobs whose deadline falls inside a horizon that is not a multiple of
    /// their period never see their successor arrive.
    fn sweep_overdue(&mut self) {
        let now = self.current_time;
        for processor in self.processors.iter_mut() {
            for (task_id, instance, deadline) in processor.sweep_overdue(now) {
                warn!(
                    "t={} CPU {}: {}#{} unfinished at its deadline {}",
                    now,
                    processor.id(),
                    task_id,
                    instance,
                    deadline
                );
                self.misses.push(DeadlineMiss {
                    task_id,
                    instance,
                    processor: processor.id(),
                    absolute_deadline: deadline,
                    detected_at: now,
                });
            }
        }
    }
}

/// Final state of a finished simulation.
#[derive(Debug)]
pub struct SimulationReport {
    processors: Vec<Processor>,
    max_time: TimeStep,
    misses: Vec<DeadlineMiss>,
}

impl SimulationReport {
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn max_time(&self) -> TimeStep {
        self.max_time
    }

    /// Deadline misses in detection order.
    pub fn misses(&self) -> &[DeadlineMiss] {
        &self.misses
    }

    pub fn misses_on(&self, processor: ID) -> impl Iterator<Item = &DeadlineMiss> {
        self.misses.iter().filter(move |m| m.processor == processor)
    }

    pub fn is_schedulable(&self) -> bool {
        self.misses.is_empty()
    }

    pub fn code(&self) -> SchedulingCode {
        if self.is_schedulable() {
            SchedulingCode::Schedulable
        } else {
            SchedulingCode::DeadlineMissed
        }
    }
}
