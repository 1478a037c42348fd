//! Partitioned Rate-Monotonic scheduling simulator.
//!
//! Tasks are assigned to processors by First-Fit under the Liu & Layland
//! bound, then every processor is simulated with preemptive fixed
//! priorities by an event-driven engine sharing one global clock.

pub mod gantt;
pub mod models;
pub mod simulation;
pub mod utils;

pub use models::scheduler;
pub use models::{Interval, Job, Partition, Processor, ReadyQueue, Slot, Task, TaskSet, TimeStep, ID};
pub use simulation::simulate;
pub use utils::{constants, errors, logger};
pub use utils::{liu_layland_bound, multiple_lcm, SchedulingCode, SchedulingError};
